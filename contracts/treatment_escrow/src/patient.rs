//! Patient accounts and their archive of completed treatments.

use common::bump_persistent;
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::ContractError;
use crate::storage::{self, DataKey, OwnedRecord, Record};
use crate::treatment::Treatment;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientAccount {
    pub owner: Address,
    pub balance: i128,
    /// Number of treatments filed into the history.
    pub archived: u32,
    pub created_at: u64,
}

impl Record for PatientAccount {
    fn key(&self) -> DataKey {
        DataKey::Patient(self.owner.clone())
    }
}

impl OwnedRecord for PatientAccount {
    fn owner(&self) -> &Address {
        &self.owner
    }
}

impl PatientAccount {
    pub fn credit(&mut self, amount: i128) -> Result<(), ContractError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: i128) -> Result<(), ContractError> {
        if self.balance < amount {
            return Err(ContractError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(())
    }

    /// Empties the account and returns what it held.
    pub fn drain(&mut self) -> i128 {
        core::mem::take(&mut self.balance)
    }
}

pub fn create(env: &Env, owner: &Address) -> Result<PatientAccount, ContractError> {
    if env.storage().persistent().has(&DataKey::Patient(owner.clone())) {
        return Err(ContractError::PatientExists);
    }
    let account = PatientAccount {
        owner: owner.clone(),
        balance: 0,
        archived: 0,
        created_at: env.ledger().timestamp(),
    };
    storage::save(env, &account);
    Ok(account)
}

pub fn get(env: &Env, owner: &Address) -> Result<PatientAccount, ContractError> {
    storage::load(env, &DataKey::Patient(owner.clone())).ok_or(ContractError::PatientNotFound)
}

/// Loads `owner`'s account for mutation. `owner` must already be
/// authenticated.
pub fn load_for(env: &Env, owner: &Address) -> Result<PatientAccount, ContractError> {
    storage::load_owned(
        env,
        &DataKey::Patient(owner.clone()),
        owner,
        ContractError::PatientNotFound,
    )
}

/// Files a completed treatment into `account`'s history. The caller saves
/// `account` afterwards.
pub fn file(
    env: &Env,
    account: &mut PatientAccount,
    treatment: &Treatment,
) -> Result<(), ContractError> {
    let key = DataKey::PatientTreatment(account.owner.clone(), treatment.id);
    if env.storage().persistent().has(&key) {
        return Err(ContractError::AlreadyArchived);
    }
    env.storage().persistent().set(&key, treatment);
    bump_persistent(env, &key);

    let index_key = DataKey::PatientHistory(account.owner.clone());
    let mut index = history(env, &account.owner);
    index.push_back(treatment.id);
    env.storage().persistent().set(&index_key, &index);
    bump_persistent(env, &index_key);

    account.archived = account
        .archived
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    Ok(())
}

pub fn archived_treatment(
    env: &Env,
    owner: &Address,
    treatment_id: u64,
) -> Result<Treatment, ContractError> {
    storage::load(env, &DataKey::PatientTreatment(owner.clone(), treatment_id))
        .ok_or(ContractError::TreatmentNotFound)
}

/// Treatment ids in the order they were filed.
pub fn history(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::PatientHistory(owner.clone()))
        .unwrap_or(Vec::new(env))
}
