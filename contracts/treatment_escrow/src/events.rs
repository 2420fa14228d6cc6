use crate::capability::CapabilityKind;
use crate::registry::RegistryEntry;
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub admin_cap: u64,
    pub timestamp: u64,
}

/// Event published when a capability is minted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapabilityIssuedEvent {
    pub cap_id: u64,
    pub kind: CapabilityKind,
    pub holder: Address,
    pub issued_by: u64,
    pub timestamp: u64,
}

/// Event published when a capability changes hands.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapabilityTransferredEvent {
    pub cap_id: u64,
    pub from: Address,
    pub to: Address,
    pub timestamp: u64,
}

/// Event published when the treatment timeout ceiling changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub max_timeout: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientCreatedEvent {
    pub patient: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HospitalCreatedEvent {
    pub hospital: u64,
    pub name: String,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRegisteredEvent {
    pub entry: RegistryEntry,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentCreatedEvent {
    pub treatment: u64,
    pub hospital: u64,
    pub doctor: Address,
    pub deadline: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentPricedEvent {
    pub treatment: u64,
    pub pharmacist: Address,
    pub price: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentPaidEvent {
    pub treatment: u64,
    pub hospital: u64,
    pub payer: Address,
    pub price: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentArchivedEvent {
    pub treatment: u64,
    pub patient: Address,
    pub timestamp: u64,
}

/// Event published when the doctor amends a live treatment.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentAmendedEvent {
    pub treatment: u64,
    pub payer: Option<Address>,
    pub deadline: u64,
    pub timestamp: u64,
}

/// Event published for deposits and withdrawals on either kind of balance.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsMovedEvent {
    pub account: Address,
    pub amount: i128,
    pub balance: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HospitalWithdrawnEvent {
    pub hospital: u64,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, token: Address, admin_cap: u64) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        token,
        admin_cap,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_config_updated(env: &Env, max_timeout: u64) {
    let topics = (symbol_short!("CFG_UPD"),);
    let data = ConfigUpdatedEvent {
        max_timeout,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_patient_created(env: &Env, patient: Address) {
    let topics = (symbol_short!("PAT_NEW"), patient.clone());
    let data = PatientCreatedEvent {
        patient,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_capability_issued(
    env: &Env,
    cap_id: u64,
    kind: CapabilityKind,
    holder: Address,
    issued_by: u64,
) {
    let topics = (symbol_short!("CAP_ISS"), holder.clone());
    let data = CapabilityIssuedEvent {
        cap_id,
        kind,
        holder,
        issued_by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_capability_transferred(env: &Env, cap_id: u64, from: Address, to: Address) {
    let topics = (symbol_short!("CAP_XFR"), from.clone(), to.clone());
    let data = CapabilityTransferredEvent {
        cap_id,
        from,
        to,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_hospital_created(env: &Env, hospital: u64, name: String) {
    let topics = (symbol_short!("HOSP_NEW"), hospital);
    let data = HospitalCreatedEvent {
        hospital,
        name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_role_registered(env: &Env, entry: RegistryEntry) {
    let topics = (symbol_short!("REG_ADD"),);
    let data = RoleRegisteredEvent {
        entry,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_treatment_created(
    env: &Env,
    treatment: u64,
    hospital: u64,
    doctor: Address,
    deadline: u64,
) {
    let topics = (symbol_short!("TRT_NEW"), hospital, doctor.clone());
    let data = TreatmentCreatedEvent {
        treatment,
        hospital,
        doctor,
        deadline,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_treatment_priced(env: &Env, treatment: u64, pharmacist: Address, price: i128) {
    let topics = (symbol_short!("TRT_PRC"), treatment);
    let data = TreatmentPricedEvent {
        treatment,
        pharmacist,
        price,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_treatment_paid(
    env: &Env,
    treatment: u64,
    hospital: u64,
    payer: Address,
    price: i128,
) {
    let topics = (symbol_short!("TRT_PAY"), treatment, payer.clone());
    let data = TreatmentPaidEvent {
        treatment,
        hospital,
        payer,
        price,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_treatment_archived(env: &Env, treatment: u64, patient: Address) {
    let topics = (symbol_short!("TRT_ARC"), patient.clone());
    let data = TreatmentArchivedEvent {
        treatment,
        patient,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_treatment_amended(
    env: &Env,
    treatment: u64,
    payer: Option<Address>,
    deadline: u64,
) {
    let topics = (symbol_short!("TRT_AMD"), treatment);
    let data = TreatmentAmendedEvent {
        treatment,
        payer,
        deadline,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_deposit(env: &Env, account: Address, amount: i128, balance: i128) {
    let topics = (symbol_short!("DEPOSIT"), account.clone());
    let data = FundsMovedEvent {
        account,
        amount,
        balance,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_withdrawal(env: &Env, account: Address, amount: i128) {
    let topics = (symbol_short!("WITHDRAW"), account.clone());
    let data = FundsMovedEvent {
        account,
        amount,
        balance: 0,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_hospital_withdrawn(env: &Env, hospital: u64, to: Address, amount: i128) {
    let topics = (symbol_short!("HOSP_WD"), hospital);
    let data = HospitalWithdrawnEvent {
        hospital,
        to,
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
