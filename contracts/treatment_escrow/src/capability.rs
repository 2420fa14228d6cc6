//! Capability tokens.
//!
//! A capability is a persisted record naming its current holder. Possession
//! is the only proof of role: an operation that needs a role takes the
//! capability id, and this module turns it into a verified handle
//! ([`AdminCap`], [`DoctorCap`], [`PharmacistCap`]) after checking the
//! holder's signature, the holder field and the kind.
//!
//! Handles have no `Clone`/`Copy` and can only be built here, so a verified
//! capability is consumed by the operation it was claimed for. Persisted
//! capabilities are moved between holders with [`transfer`], never copied.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::ContractError;
use crate::storage::{self, DataKey, OwnedRecord, Record};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CapabilityKind {
    Admin,
    /// Bound to a hospital id.
    Doctor(u64),
    /// Bound to a hospital id.
    Pharmacist(u64),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Capability {
    pub id: u64,
    pub kind: CapabilityKind,
    pub holder: Address,
    pub issued_at: u64,
}

impl Record for Capability {
    fn key(&self) -> DataKey {
        DataKey::Capability(self.id)
    }
}

impl OwnedRecord for Capability {
    fn owner(&self) -> &Address {
        &self.holder
    }
}

/// Proof that the caller holds an Admin capability.
#[derive(Debug)]
pub struct AdminCap {
    id: u64,
}

/// Proof that the caller holds a Doctor capability for one hospital.
#[derive(Debug)]
pub struct DoctorCap {
    id: u64,
    hospital: u64,
}

/// Proof that the caller holds a Pharmacist capability for one hospital.
#[derive(Debug)]
pub struct PharmacistCap {
    id: u64,
    hospital: u64,
}

impl AdminCap {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl DoctorCap {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Fails unless the capability was minted for `hospital`.
    pub fn authorize(&self, hospital: u64) -> Result<(), ContractError> {
        if self.hospital != hospital {
            return Err(ContractError::DoctorNotInHospital);
        }
        Ok(())
    }
}

impl PharmacistCap {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Fails unless the capability was minted for `hospital`.
    pub fn authorize(&self, hospital: u64) -> Result<(), ContractError> {
        if self.hospital != hospital {
            return Err(ContractError::PharmacistNotInHospital);
        }
        Ok(())
    }
}

fn holder_capabilities(env: &Env, holder: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::HolderCapabilities(holder.clone()))
        .unwrap_or(Vec::new(env))
}

fn set_holder_capabilities(env: &Env, holder: &Address, ids: &Vec<u64>) {
    let key = DataKey::HolderCapabilities(holder.clone());
    env.storage().persistent().set(&key, ids);
    common::bump_persistent(env, &key);
}

pub fn get(env: &Env, id: u64) -> Result<Capability, ContractError> {
    storage::load(env, &DataKey::Capability(id)).ok_or(ContractError::CapabilityNotFound)
}

pub fn list(env: &Env, holder: &Address) -> Vec<u64> {
    holder_capabilities(env, holder)
}

/// Mints a capability straight into `holder`'s possession.
///
/// Callers are responsible for having verified an Admin capability first,
/// except for the bootstrap capability minted by `initialize`.
pub(crate) fn mint(
    env: &Env,
    kind: CapabilityKind,
    holder: &Address,
) -> Result<Capability, ContractError> {
    let id = storage::next_id(env, DataKey::CapabilityCounter)?;
    let capability = Capability {
        id,
        kind,
        holder: holder.clone(),
        issued_at: env.ledger().timestamp(),
    };
    storage::save(env, &capability);

    let mut ids = holder_capabilities(env, holder);
    ids.push_back(id);
    set_holder_capabilities(env, holder, &ids);

    Ok(capability)
}

/// Whether `holder` currently holds any Admin capability.
pub fn holds_admin(env: &Env, holder: &Address) -> bool {
    holder_capabilities(env, holder)
        .iter()
        .any(|id| matches!(get(env, id), Ok(cap) if cap.kind == CapabilityKind::Admin))
}

/// Loads capability `id` and checks that `caller` signed and holds it.
fn claim(env: &Env, caller: &Address, id: u64) -> Result<Capability, ContractError> {
    caller.require_auth();
    match storage::load_owned::<Capability>(
        env,
        &DataKey::Capability(id),
        caller,
        ContractError::CapabilityNotFound,
    ) {
        Err(ContractError::NotOwner) => Err(ContractError::NotCapabilityHolder),
        other => other,
    }
}

pub fn claim_admin(env: &Env, caller: &Address, id: u64) -> Result<AdminCap, ContractError> {
    match claim(env, caller, id)?.kind {
        CapabilityKind::Admin => Ok(AdminCap { id }),
        _ => Err(ContractError::Unauthorized),
    }
}

pub fn claim_doctor(env: &Env, caller: &Address, id: u64) -> Result<DoctorCap, ContractError> {
    match claim(env, caller, id)?.kind {
        CapabilityKind::Doctor(hospital) => Ok(DoctorCap { id, hospital }),
        _ => Err(ContractError::Unauthorized),
    }
}

pub fn claim_pharmacist(
    env: &Env,
    caller: &Address,
    id: u64,
) -> Result<PharmacistCap, ContractError> {
    match claim(env, caller, id)?.kind {
        CapabilityKind::Pharmacist(hospital) => Ok(PharmacistCap { id, hospital }),
        _ => Err(ContractError::Unauthorized),
    }
}

/// Moves capability `id` from `holder` to `recipient`.
pub fn transfer(
    env: &Env,
    holder: &Address,
    id: u64,
    recipient: &Address,
) -> Result<Capability, ContractError> {
    let mut capability = claim(env, holder, id)?;
    if holder == recipient {
        return Ok(capability);
    }

    let mut remaining = Vec::new(env);
    for held in holder_capabilities(env, holder).iter() {
        if held != id {
            remaining.push_back(held);
        }
    }
    set_holder_capabilities(env, holder, &remaining);

    let mut ids = holder_capabilities(env, recipient);
    ids.push_back(id);
    set_holder_capabilities(env, recipient, &ids);

    capability.holder = recipient.clone();
    storage::save(env, &capability);

    Ok(capability)
}
