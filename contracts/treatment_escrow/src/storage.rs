//! Storage layout and record access.
//!
//! Every entry is keyed by [`DataKey`]. Configuration and id counters live in
//! instance storage; records live in persistent storage and have their TTL
//! extended on every write.
//!
//! Records come in two flavours:
//!
//! - [`SharedRecord`]: hospitals, treatments and the role registry. Any party
//!   holding a matching capability may mutate them; the host serializes
//!   conflicting invocations.
//! - [`OwnedRecord`]: patient accounts and capabilities. Only the owning
//!   address may load them for mutation, see [`load_owned`].

use common::{bump_instance, bump_persistent};
use soroban_sdk::{contracttype, Address, Env, IntoVal, TryFromVal, Val};

use crate::errors::ContractError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Registry,
    CapabilityCounter,
    HospitalCounter,
    TreatmentCounter,
    Capability(u64),
    HolderCapabilities(Address),
    Hospital(u64),
    Treatment(u64),
    Patient(Address),
    PatientTreatment(Address, u64),
    PatientHistory(Address),
}

/// A value stored under a key derived from its own identity.
pub trait Record {
    fn key(&self) -> DataKey;
}

/// Marker for records written by several parties under host serialization.
pub trait SharedRecord: Record {}

/// Marker for records exclusively owned by one address.
pub trait OwnedRecord: Record {
    fn owner(&self) -> &Address;
}

pub fn save<R>(env: &Env, record: &R)
where
    R: Record + IntoVal<Env, Val>,
{
    let key = record.key();
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

pub fn load<R>(env: &Env, key: &DataKey) -> Option<R>
where
    R: TryFromVal<Env, Val>,
    <R as TryFromVal<Env, Val>>::Error: core::fmt::Debug,
{
    env.storage().persistent().get(key)
}

pub fn load_shared<R>(env: &Env, key: &DataKey, missing: ContractError) -> Result<R, ContractError>
where
    R: SharedRecord + TryFromVal<Env, Val>,
    <R as TryFromVal<Env, Val>>::Error: core::fmt::Debug,
{
    load(env, key).ok_or(missing)
}

/// Loads an owned record for mutation by `caller`.
///
/// The caller must already have been authenticated; this only checks that
/// the record belongs to them.
pub fn load_owned<R>(
    env: &Env,
    key: &DataKey,
    caller: &Address,
    missing: ContractError,
) -> Result<R, ContractError>
where
    R: OwnedRecord + TryFromVal<Env, Val>,
    <R as TryFromVal<Env, Val>>::Error: core::fmt::Debug,
{
    let record: R = load(env, key).ok_or(missing)?;
    if record.owner() != caller {
        return Err(ContractError::NotOwner);
    }
    Ok(record)
}

/// Allocates the next id from an instance-storage counter. Ids start at 1.
pub fn next_id(env: &Env, counter: DataKey) -> Result<u64, ContractError> {
    let current: u64 = env.storage().instance().get(&counter).unwrap_or(0);
    let next = current.checked_add(1).ok_or(ContractError::Overflow)?;
    env.storage().instance().set(&counter, &next);
    bump_instance(env);
    Ok(next)
}

pub fn current_id(env: &Env, counter: DataKey) -> u64 {
    env.storage().instance().get(&counter).unwrap_or(0)
}
