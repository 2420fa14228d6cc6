use soroban_sdk::{contracttype, Env, String};

use crate::errors::ContractError;
use crate::storage::{self, DataKey, Record, SharedRecord};

/// A hospital and its escrow pool of settled treatment payments.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hospital {
    pub id: u64,
    pub name: String,
    pub balance: i128,
    pub created_at: u64,
}

impl Record for Hospital {
    fn key(&self) -> DataKey {
        DataKey::Hospital(self.id)
    }
}

impl SharedRecord for Hospital {}

impl Hospital {
    /// Adds a settled payment to the pool.
    pub fn credit(&mut self, amount: i128) -> Result<(), ContractError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(ContractError::Overflow)?;
        Ok(())
    }

    /// Empties the pool and returns what it held.
    pub fn drain(&mut self) -> i128 {
        core::mem::take(&mut self.balance)
    }
}

pub fn create(env: &Env, name: String) -> Result<Hospital, ContractError> {
    let hospital = Hospital {
        id: storage::next_id(env, DataKey::HospitalCounter)?,
        name,
        balance: 0,
        created_at: env.ledger().timestamp(),
    };
    storage::save(env, &hospital);
    Ok(hospital)
}

pub fn get(env: &Env, id: u64) -> Result<Hospital, ContractError> {
    storage::load_shared(env, &DataKey::Hospital(id), ContractError::HospitalNotFound)
}
