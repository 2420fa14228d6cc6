#![no_std]
//! Treatment escrow contract.
//!
//! A doctor opens a treatment under a hospital, a pharmacist of the same
//! hospital prices it, and the patient pays it from a prepaid balance. The
//! payment moves funds into the hospital's escrow pool and seals the
//! treatment, which the patient then files into their own history. Every
//! privileged step is gated by a capability bound to the hospital it may act
//! on; see [`capability`].

pub mod capability;
pub mod config;
pub mod errors;
pub mod escrow;
mod events;
pub mod hospital;
pub mod patient;
pub mod registry;
pub mod storage;
pub mod treatment;
pub mod validation;

use common::SettlementLock;
use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

pub use capability::{Capability, CapabilityKind};
pub use config::EscrowConfig;
pub use errors::{ContractError, ErrorKind};
pub use hospital::Hospital;
pub use patient::PatientAccount;
pub use registry::{RegistryEntry, RoleRegistry};
pub use treatment::{ClinicalNotes, Treatment, TreatmentStatus};

fn ensure_initialized(env: &Env) -> Result<(), ContractError> {
    if !config::is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

fn lock(env: &Env) -> Result<SettlementLock<'_>, ContractError> {
    SettlementLock::acquire(env).map_err(|_| ContractError::SettlementInProgress)
}

#[contract]
pub struct TreatmentEscrowContract;

#[contractimpl]
impl TreatmentEscrowContract {
    // ======================== Setup ========================

    /// Initialize the contract: store the settlement token, create the role
    /// registry with `admin` listed as admin, and mint `admin` the first
    /// Admin capability. Returns that capability's id.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<u64, ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        config::save(
            &env,
            &EscrowConfig {
                token: token.clone(),
                max_timeout: config::DEFAULT_MAX_TIMEOUT,
            },
        );
        registry::create(&env, &admin);
        let cap = capability::mint(&env, CapabilityKind::Admin, &admin)?;

        events::publish_initialized(&env, admin, token, cap.id);

        Ok(cap.id)
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_config(env: Env) -> Result<EscrowConfig, ContractError> {
        config::load(&env)
    }

    /// Change the upper bound on treatment timeouts. Existing treatments keep
    /// their window.
    pub fn set_max_timeout(
        env: Env,
        caller: Address,
        admin_cap: u64,
        max_timeout: u64,
    ) -> Result<(), ContractError> {
        capability::claim_admin(&env, &caller, admin_cap)?;
        if max_timeout == 0 {
            return Err(ContractError::InvalidTimeout);
        }
        let mut cfg = config::load(&env)?;
        cfg.max_timeout = max_timeout;
        config::save(&env, &cfg);

        events::publish_config_updated(&env, max_timeout);

        Ok(())
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ======================== Capabilities ========================

    /// Mint a Doctor capability bound to `hospital_id` and give it to
    /// `recipient`, who is recorded in the registry's doctor list.
    pub fn issue_doctor_cap(
        env: Env,
        caller: Address,
        admin_cap: u64,
        hospital_id: u64,
        recipient: Address,
    ) -> Result<u64, ContractError> {
        let admin = capability::claim_admin(&env, &caller, admin_cap)?;
        hospital::get(&env, hospital_id)?;

        let entry = RegistryEntry::Doctor(recipient.clone());
        registry::append(&env, &caller, &admin, &entry)?;
        let cap = capability::mint(&env, CapabilityKind::Doctor(hospital_id), &recipient)?;

        events::publish_role_registered(&env, entry);
        events::publish_capability_issued(&env, cap.id, cap.kind, recipient, admin.id());

        Ok(cap.id)
    }

    /// Mint a Pharmacist capability bound to `hospital_id` and give it to
    /// `recipient`, who is recorded in the registry's pharmacist list.
    pub fn issue_pharmacist_cap(
        env: Env,
        caller: Address,
        admin_cap: u64,
        hospital_id: u64,
        recipient: Address,
    ) -> Result<u64, ContractError> {
        let admin = capability::claim_admin(&env, &caller, admin_cap)?;
        hospital::get(&env, hospital_id)?;

        let entry = RegistryEntry::Pharmacist(recipient.clone());
        registry::append(&env, &caller, &admin, &entry)?;
        let cap = capability::mint(&env, CapabilityKind::Pharmacist(hospital_id), &recipient)?;

        events::publish_role_registered(&env, entry);
        events::publish_capability_issued(&env, cap.id, cap.kind, recipient, admin.id());

        Ok(cap.id)
    }

    /// Mint a further Admin capability for `new_admin` and list them as
    /// admin in the registry.
    pub fn add_admin(
        env: Env,
        caller: Address,
        admin_cap: u64,
        new_admin: Address,
    ) -> Result<u64, ContractError> {
        let admin = capability::claim_admin(&env, &caller, admin_cap)?;
        registry::add_admin(&env, &caller, &admin, &new_admin)?;
        let cap = capability::mint(&env, CapabilityKind::Admin, &new_admin)?;

        events::publish_capability_issued(&env, cap.id, cap.kind, new_admin, admin.id());

        Ok(cap.id)
    }

    /// Hand a capability to another address. The current holder loses it.
    /// Handing over an Admin capability lists the recipient as admin and
    /// delists the holder once they hold no Admin capability at all.
    pub fn transfer_capability(
        env: Env,
        holder: Address,
        cap_id: u64,
        recipient: Address,
    ) -> Result<(), ContractError> {
        let cap = capability::transfer(&env, &holder, cap_id, &recipient)?;
        if cap.kind == CapabilityKind::Admin {
            registry::enroll_admin(&env, &recipient)?;
            if !capability::holds_admin(&env, &holder) {
                registry::retire_admin(&env, &holder)?;
            }
        }

        events::publish_capability_transferred(&env, cap_id, holder, recipient);

        Ok(())
    }

    pub fn get_capability(env: Env, cap_id: u64) -> Result<Capability, ContractError> {
        capability::get(&env, cap_id)
    }

    /// Ids of every capability `holder` currently holds.
    pub fn get_capabilities(env: Env, holder: Address) -> Vec<u64> {
        capability::list(&env, &holder)
    }

    // ======================== Registry ========================

    /// Append an entry to the role registry. Duplicates are kept.
    pub fn register_role(
        env: Env,
        caller: Address,
        admin_cap: u64,
        entry: RegistryEntry,
    ) -> Result<(), ContractError> {
        let admin = capability::claim_admin(&env, &caller, admin_cap)?;
        registry::append(&env, &caller, &admin, &entry)?;
        events::publish_role_registered(&env, entry);
        Ok(())
    }

    pub fn get_registry(env: Env) -> Result<RoleRegistry, ContractError> {
        registry::get(&env)
    }

    pub fn is_admin(env: Env, who: Address) -> bool {
        registry::is_admin(&env, &who)
    }

    // ======================== Hospitals ========================

    pub fn create_hospital(
        env: Env,
        caller: Address,
        admin_cap: u64,
        name: String,
    ) -> Result<u64, ContractError> {
        let admin = capability::claim_admin(&env, &caller, admin_cap)?;
        registry::ensure_admin(&env, &caller)?;
        validation::validate_name(&name)?;

        let created = hospital::create(&env, name)?;
        let entry = RegistryEntry::Hospital(created.id);
        registry::append(&env, &caller, &admin, &entry)?;

        events::publish_hospital_created(&env, created.id, created.name);
        events::publish_role_registered(&env, entry);

        Ok(created.id)
    }

    pub fn get_hospital(env: Env, hospital_id: u64) -> Result<Hospital, ContractError> {
        hospital::get(&env, hospital_id)
    }

    pub fn get_hospital_balance(env: Env, hospital_id: u64) -> Result<i128, ContractError> {
        Ok(hospital::get(&env, hospital_id)?.balance)
    }

    /// Withdraw a hospital's entire escrow pool to the calling admin.
    pub fn hospital_withdraw(
        env: Env,
        caller: Address,
        admin_cap: u64,
        hospital_id: u64,
    ) -> Result<i128, ContractError> {
        capability::claim_admin(&env, &caller, admin_cap)?;
        let _lock = lock(&env)?;

        let mut pool = hospital::get(&env, hospital_id)?;
        let amount = pool.drain();
        storage::save(&env, &pool);
        escrow::push(&env, &caller, amount)?;

        events::publish_hospital_withdrawn(&env, hospital_id, caller, amount);

        Ok(amount)
    }

    // ======================== Patients ========================

    pub fn create_patient_account(env: Env, owner: Address) -> Result<(), ContractError> {
        ensure_initialized(&env)?;
        owner.require_auth();
        patient::create(&env, &owner)?;

        events::publish_patient_created(&env, owner);

        Ok(())
    }

    pub fn get_patient(env: Env, owner: Address) -> Result<PatientAccount, ContractError> {
        patient::get(&env, &owner)
    }

    pub fn get_patient_balance(env: Env, owner: Address) -> Result<i128, ContractError> {
        Ok(patient::get(&env, &owner)?.balance)
    }

    /// Pull `amount` settlement tokens from `owner` into their balance.
    pub fn deposit(env: Env, owner: Address, amount: i128) -> Result<i128, ContractError> {
        ensure_initialized(&env)?;
        owner.require_auth();
        validation::validate_amount(amount)?;
        let _lock = lock(&env)?;

        let mut account = patient::load_for(&env, &owner)?;
        account.credit(amount)?;
        storage::save(&env, &account);
        escrow::pull(&env, &owner, amount)?;

        events::publish_deposit(&env, owner, amount, account.balance);

        Ok(account.balance)
    }

    /// Withdraw `owner`'s entire balance. Returns the amount sent.
    pub fn withdraw(env: Env, owner: Address) -> Result<i128, ContractError> {
        ensure_initialized(&env)?;
        owner.require_auth();
        let _lock = lock(&env)?;

        let mut account = patient::load_for(&env, &owner)?;
        let amount = account.drain();
        storage::save(&env, &account);
        escrow::push(&env, &owner, amount)?;

        events::publish_withdrawal(&env, owner, amount);

        Ok(amount)
    }

    /// Read a treatment from `owner`'s archive.
    pub fn get_treatment(
        env: Env,
        owner: Address,
        treatment_id: u64,
    ) -> Result<Treatment, ContractError> {
        patient::archived_treatment(&env, &owner, treatment_id)
    }

    /// Ids of the treatments `owner` has archived, oldest first.
    pub fn get_patient_treatments(env: Env, owner: Address) -> Vec<u64> {
        patient::history(&env, &owner)
    }

    // ======================== Treatments ========================

    /// Open a Pending treatment under `hospital_id`.
    pub fn create_treatment(
        env: Env,
        caller: Address,
        doctor_cap: u64,
        hospital_id: u64,
        notes: ClinicalNotes,
        timeout: u64,
    ) -> Result<u64, ContractError> {
        let doctor = capability::claim_doctor(&env, &caller, doctor_cap)?;
        doctor.authorize(hospital_id)?;
        hospital::get(&env, hospital_id)?;
        validation::validate_notes(&notes)?;
        validation::validate_timeout(timeout, config::load(&env)?.max_timeout)?;

        let created = treatment::create(&env, hospital_id, &caller, notes, timeout)?;

        events::publish_treatment_created(
            &env,
            created.id,
            hospital_id,
            caller,
            created.deadline(),
        );

        Ok(created.id)
    }

    /// Bind the patient expected to pay. Only the treatment's doctor, while
    /// it is unpaid and unexpired.
    pub fn assign_payer(
        env: Env,
        caller: Address,
        doctor_cap: u64,
        treatment_id: u64,
        payer: Address,
    ) -> Result<(), ContractError> {
        let doctor = capability::claim_doctor(&env, &caller, doctor_cap)?;
        let mut record = treatment::get(&env, treatment_id)?;
        doctor.authorize(record.hospital)?;
        if record.doctor != caller {
            return Err(ContractError::NotTreatmentDoctor);
        }

        record.bind_payer(&payer, env.ledger().timestamp())?;
        storage::save(&env, &record);

        let deadline = record.deadline();
        events::publish_treatment_amended(&env, treatment_id, record.payer, deadline);

        Ok(())
    }

    /// Replace the timeout window. Only the treatment's doctor, only while
    /// Pending and unexpired.
    pub fn set_timeout(
        env: Env,
        caller: Address,
        doctor_cap: u64,
        treatment_id: u64,
        timeout: u64,
    ) -> Result<(), ContractError> {
        let doctor = capability::claim_doctor(&env, &caller, doctor_cap)?;
        let mut record = treatment::get(&env, treatment_id)?;
        doctor.authorize(record.hospital)?;
        if record.doctor != caller {
            return Err(ContractError::NotTreatmentDoctor);
        }
        validation::validate_timeout(timeout, config::load(&env)?.max_timeout)?;

        record.set_timeout(timeout, env.ledger().timestamp())?;
        storage::save(&env, &record);

        let deadline = record.deadline();
        events::publish_treatment_amended(&env, treatment_id, record.payer, deadline);

        Ok(())
    }

    /// Price a Pending treatment. The pharmacist capability must be bound to
    /// the hospital the treatment was opened under.
    pub fn set_price(
        env: Env,
        caller: Address,
        pharmacist_cap: u64,
        treatment_id: u64,
        price: i128,
    ) -> Result<(), ContractError> {
        let pharmacist = capability::claim_pharmacist(&env, &caller, pharmacist_cap)?;
        let mut record = treatment::get(&env, treatment_id)?;
        pharmacist.authorize(record.hospital)?;

        record.set_price(&caller, price, env.ledger().timestamp())?;
        storage::save(&env, &record);

        events::publish_treatment_priced(&env, treatment_id, caller, price);

        Ok(())
    }

    /// Pay a Priced treatment from `payer`'s balance into the hospital's
    /// escrow pool and seal it. The first successful payer becomes the
    /// treatment's payer.
    pub fn pay(env: Env, payer: Address, treatment_id: u64) -> Result<(), ContractError> {
        ensure_initialized(&env)?;
        payer.require_auth();
        let _lock = lock(&env)?;

        let mut record = treatment::get(&env, treatment_id)?;
        let price = record.amount_due(&payer, env.ledger().timestamp())?;
        let mut account = patient::load_for(&env, &payer)?;
        let mut pool = hospital::get(&env, record.hospital)?;

        escrow::settle(&mut account, &mut pool, price)?;
        record.mark_paid(&payer);

        storage::save(&env, &account);
        storage::save(&env, &pool);
        storage::save(&env, &record);

        log!(&env, "treatment settled", treatment_id, price);
        events::publish_treatment_paid(&env, treatment_id, record.hospital, payer, price);

        Ok(())
    }

    /// Move a paid treatment out of shared storage into `owner`'s history.
    pub fn archive_treatment(
        env: Env,
        owner: Address,
        treatment_id: u64,
    ) -> Result<(), ContractError> {
        ensure_initialized(&env)?;
        owner.require_auth();

        let mut account = patient::load_for(&env, &owner)?;
        let record = treatment::get(&env, treatment_id)?;
        record.ensure_archivable(&owner)?;

        patient::file(&env, &mut account, &record)?;
        storage::save(&env, &account);
        treatment::remove(&env, treatment_id);

        events::publish_treatment_archived(&env, treatment_id, owner);

        Ok(())
    }

    /// Read a live (not yet archived) treatment.
    pub fn get_treatment_record(env: Env, treatment_id: u64) -> Result<Treatment, ContractError> {
        treatment::get(&env, treatment_id)
    }

    /// Price of a live treatment; 0 while unpriced.
    pub fn get_treatment_price(env: Env, treatment_id: u64) -> Result<i128, ContractError> {
        Ok(treatment::get(&env, treatment_id)?.price)
    }

    pub fn is_treatment_expired(env: Env, treatment_id: u64) -> Result<bool, ContractError> {
        Ok(treatment::get(&env, treatment_id)?.is_expired(env.ledger().timestamp()))
    }

    /// Number of treatments ever created.
    pub fn get_treatment_count(env: Env) -> u64 {
        storage::current_id(&env, storage::DataKey::TreatmentCounter)
    }
}
