//! Role registry: an append-only audit ledger of who was admitted into which
//! role. Authorization never consults it; capabilities do that. Only an
//! address already listed as admin may append.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::capability::AdminCap;
use crate::errors::ContractError;
use crate::storage::{self, DataKey, Record, SharedRecord};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRegistry {
    pub admins: Vec<Address>,
    pub hospitals: Vec<u64>,
    pub doctors: Vec<Address>,
    pub pharmacists: Vec<Address>,
    pub patients: Vec<Address>,
}

impl Record for RoleRegistry {
    fn key(&self) -> DataKey {
        DataKey::Registry
    }
}

impl SharedRecord for RoleRegistry {}

/// One append to the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryEntry {
    Hospital(u64),
    Doctor(Address),
    Pharmacist(Address),
    Patient(Address),
}

pub fn create(env: &Env, admin: &Address) -> RoleRegistry {
    let mut admins = Vec::new(env);
    admins.push_back(admin.clone());
    let registry = RoleRegistry {
        admins,
        hospitals: Vec::new(env),
        doctors: Vec::new(env),
        pharmacists: Vec::new(env),
        patients: Vec::new(env),
    };
    storage::save(env, &registry);
    registry
}

pub fn get(env: &Env) -> Result<RoleRegistry, ContractError> {
    storage::load_shared(env, &DataKey::Registry, ContractError::NotInitialized)
}

/// Fails unless `who` is listed as an admin.
pub fn ensure_admin(env: &Env, who: &Address) -> Result<(), ContractError> {
    if !get(env)?.admins.contains(who) {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

pub fn is_admin(env: &Env, who: &Address) -> bool {
    get(env)
        .map(|registry| registry.admins.contains(who))
        .unwrap_or(false)
}

/// Appends `entry` on behalf of `caller`, who must hold `_cap` and be listed
/// as an admin. Duplicates are kept.
pub fn append(
    env: &Env,
    caller: &Address,
    _cap: &AdminCap,
    entry: &RegistryEntry,
) -> Result<(), ContractError> {
    ensure_admin(env, caller)?;
    let mut registry = get(env)?;

    match entry.clone() {
        RegistryEntry::Hospital(id) => registry.hospitals.push_back(id),
        RegistryEntry::Doctor(who) => registry.doctors.push_back(who),
        RegistryEntry::Pharmacist(who) => registry.pharmacists.push_back(who),
        RegistryEntry::Patient(who) => registry.patients.push_back(who),
    }

    storage::save(env, &registry);
    Ok(())
}

/// Lists `who` as an admin. Gated like [`append`].
pub fn add_admin(
    env: &Env,
    caller: &Address,
    _cap: &AdminCap,
    who: &Address,
) -> Result<(), ContractError> {
    ensure_admin(env, caller)?;
    enroll_admin(env, who)
}

/// Lists `who` as an admin without a gate. Used when an Admin capability
/// changes hands, so its new holder can append like the old one.
pub(crate) fn enroll_admin(env: &Env, who: &Address) -> Result<(), ContractError> {
    let mut registry = get(env)?;
    if !registry.admins.contains(who) {
        registry.admins.push_back(who.clone());
        storage::save(env, &registry);
    }
    Ok(())
}

/// Delists `who` as an admin. Used once an address has handed away its last
/// Admin capability. The other lists are append-only and keep their entries.
pub(crate) fn retire_admin(env: &Env, who: &Address) -> Result<(), ContractError> {
    let mut registry = get(env)?;
    if let Some(index) = registry.admins.first_index_of(who) {
        registry.admins.remove(index);
        storage::save(env, &registry);
    }
    Ok(())
}
