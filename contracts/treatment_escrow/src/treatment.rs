//! Treatment records and their lifecycle.
//!
//! ```text
//! Pending --set_price--> Priced --pay--> Paid --archive--> (patient history)
//! ```
//!
//! Every transition after creation must happen strictly before
//! `date + timeout`. The transition methods on [`Treatment`] only check and
//! mutate the in-memory value; the contract entry points decide when to
//! persist it, so a failed check leaves storage untouched.

use soroban_sdk::{contracttype, Address, Env, String};

use crate::errors::ContractError;
use crate::storage::{self, DataKey, Record, SharedRecord};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TreatmentStatus {
    Pending = 1,
    Priced = 2,
    Paid = 3,
}

/// Free-text clinical fields written by the doctor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClinicalNotes {
    pub patient_info: String,
    pub condition: String,
    pub medicine: String,
    pub guide: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Treatment {
    pub id: u64,
    pub hospital: u64,
    pub doctor: Address,
    pub pharmacist: Option<Address>,
    pub payer: Option<Address>,
    pub notes: ClinicalNotes,
    /// Creation timestamp; the timeout window is measured from here.
    pub date: u64,
    pub timeout: u64,
    /// 0 until priced.
    pub price: i128,
    pub complete: bool,
    pub status: TreatmentStatus,
}

impl Record for Treatment {
    fn key(&self) -> DataKey {
        DataKey::Treatment(self.id)
    }
}

impl SharedRecord for Treatment {}

impl Treatment {
    /// First instant at which the treatment no longer accepts transitions.
    pub fn deadline(&self) -> u64 {
        self.date.saturating_add(self.timeout)
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.deadline()
    }

    fn ensure_open(&self, now: u64) -> Result<(), ContractError> {
        if self.complete {
            return Err(ContractError::AlreadyComplete);
        }
        if self.is_expired(now) {
            return Err(ContractError::TimedOut);
        }
        Ok(())
    }

    /// Pending -> Priced. The price can only be written while it is still 0.
    pub fn set_price(
        &mut self,
        pharmacist: &Address,
        price: i128,
        now: u64,
    ) -> Result<(), ContractError> {
        if self.complete {
            return Err(ContractError::AlreadyComplete);
        }
        if self.price != 0 {
            return Err(ContractError::PriceAlreadySet);
        }
        if self.is_expired(now) {
            return Err(ContractError::TimedOut);
        }
        if price <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        self.pharmacist = Some(pharmacist.clone());
        self.price = price;
        self.status = TreatmentStatus::Priced;
        Ok(())
    }

    /// Checks that `payer` may settle this treatment now and returns the
    /// amount due. Does not mutate; see [`Treatment::mark_paid`].
    pub fn amount_due(&self, payer: &Address, now: u64) -> Result<i128, ContractError> {
        if let Some(bound) = &self.payer {
            if bound != payer {
                return Err(ContractError::NotYourTreatment);
            }
        }
        self.ensure_open(now)?;
        if self.price == 0 {
            return Err(ContractError::PriceNotSet);
        }
        Ok(self.price)
    }

    /// Priced -> Paid. Binds the payer and seals the record.
    pub fn mark_paid(&mut self, payer: &Address) {
        self.payer = Some(payer.clone());
        self.complete = true;
        self.status = TreatmentStatus::Paid;
    }

    /// Pre-binds the patient expected to pay. A binding is final.
    pub fn bind_payer(&mut self, payer: &Address, now: u64) -> Result<(), ContractError> {
        self.ensure_open(now)?;
        if self.payer.is_some() {
            return Err(ContractError::PayerAlreadyBound);
        }
        self.payer = Some(payer.clone());
        Ok(())
    }

    /// Replaces the timeout window. Only allowed before pricing, so the
    /// payment window a pharmacist priced against cannot move afterwards.
    pub fn set_timeout(&mut self, timeout: u64, now: u64) -> Result<(), ContractError> {
        self.ensure_open(now)?;
        if self.status != TreatmentStatus::Pending {
            return Err(ContractError::PriceAlreadySet);
        }
        self.timeout = timeout;
        Ok(())
    }

    /// Checks that this treatment may be filed into `owner`'s history.
    pub fn ensure_archivable(&self, owner: &Address) -> Result<(), ContractError> {
        if !self.complete {
            return Err(ContractError::NotComplete);
        }
        match &self.payer {
            Some(payer) if payer == owner => Ok(()),
            _ => Err(ContractError::NotYourTreatment),
        }
    }
}

pub fn create(
    env: &Env,
    hospital: u64,
    doctor: &Address,
    notes: ClinicalNotes,
    timeout: u64,
) -> Result<Treatment, ContractError> {
    let treatment = Treatment {
        id: storage::next_id(env, DataKey::TreatmentCounter)?,
        hospital,
        doctor: doctor.clone(),
        pharmacist: None,
        payer: None,
        notes,
        date: env.ledger().timestamp(),
        timeout,
        price: 0,
        complete: false,
        status: TreatmentStatus::Pending,
    };
    storage::save(env, &treatment);
    Ok(treatment)
}

pub fn get(env: &Env, id: u64) -> Result<Treatment, ContractError> {
    storage::load_shared(env, &DataKey::Treatment(id), ContractError::TreatmentNotFound)
}

/// Drops the live record once it has moved into a patient's history.
pub fn remove(env: &Env, id: u64) {
    env.storage().persistent().remove(&DataKey::Treatment(id));
}
