use common::bump_instance;
use soroban_sdk::{contracttype, Address, Env};

use crate::errors::ContractError;
use crate::storage::DataKey;

/// One year.
pub const DEFAULT_MAX_TIMEOUT: u64 = 31_536_000;

/// Contract-wide settings, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowConfig {
    /// Stellar asset contract whose units back every balance.
    pub token: Address,
    /// Upper bound on a treatment's timeout window, in seconds.
    pub max_timeout: u64,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn load(env: &Env) -> Result<EscrowConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn save(env: &Env, config: &EscrowConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}
