//! Escrow ledger: internal balances and the settlement token that backs them.
//!
//! Internal balances always equal the tokens the contract holds: deposits
//! pull tokens in, withdrawals push them out, and settlement only moves value
//! between two internal balances.

use soroban_sdk::{log, token, Address, Env};

use crate::config;
use crate::errors::ContractError;
use crate::hospital::Hospital;
use crate::patient::PatientAccount;

/// Moves `price` from the patient's balance to the hospital's pool.
///
/// Both records are updated in memory only; on error neither has changed.
pub fn settle(
    patient: &mut PatientAccount,
    hospital: &mut Hospital,
    price: i128,
) -> Result<(), ContractError> {
    if patient.balance < price {
        return Err(ContractError::InsufficientFunds);
    }
    hospital
        .balance
        .checked_add(price)
        .ok_or(ContractError::Overflow)?;

    patient.debit(price)?;
    hospital.credit(price)
}

/// Transfers `amount` settlement tokens from `from` into the contract.
pub fn pull(env: &Env, from: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let cfg = config::load(env)?;
    token::Client::new(env, &cfg.token).transfer(from, &env.current_contract_address(), &amount);
    log!(env, "escrow pull", from.clone(), amount);
    Ok(())
}

/// Transfers `amount` settlement tokens from the contract to `to`.
pub fn push(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let cfg = config::load(env)?;
    token::Client::new(env, &cfg.token).transfer(&env.current_contract_address(), to, &amount);
    log!(env, "escrow push", to.clone(), amount);
    Ok(())
}
