#![allow(dead_code)]

use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env, String};
use treatment_escrow::{ClinicalNotes, TreatmentEscrowContract, TreatmentEscrowContractClient};

pub struct TestContext {
    pub env: Env,
    pub client: TreatmentEscrowContractClient<'static>,
    pub admin: Address,
    pub admin_cap: u64,
    pub token: Address,
}

/// A hospital with one doctor and one pharmacist bound to it.
pub struct Clinic {
    pub hospital: u64,
    pub doctor: Address,
    pub doctor_cap: u64,
    pub pharmacist: Address,
    pub pharmacist_cap: u64,
}

pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(TreatmentEscrowContract, ());
    let client = TreatmentEscrowContractClient::new(&env, &contract_id);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let admin = Address::generate(&env);
    let admin_cap = client.initialize(&admin, &token);

    TestContext {
        env,
        client,
        admin,
        admin_cap,
        token,
    }
}

pub fn open_clinic(ctx: &TestContext, name: &str) -> Clinic {
    let hospital = ctx.client.create_hospital(
        &ctx.admin,
        &ctx.admin_cap,
        &String::from_str(&ctx.env, name),
    );
    let doctor = Address::generate(&ctx.env);
    let doctor_cap = ctx
        .client
        .issue_doctor_cap(&ctx.admin, &ctx.admin_cap, &hospital, &doctor);
    let pharmacist = Address::generate(&ctx.env);
    let pharmacist_cap =
        ctx.client
            .issue_pharmacist_cap(&ctx.admin, &ctx.admin_cap, &hospital, &pharmacist);

    Clinic {
        hospital,
        doctor,
        doctor_cap,
        pharmacist,
        pharmacist_cap,
    }
}

pub fn sample_notes(env: &Env) -> ClinicalNotes {
    ClinicalNotes {
        patient_info: String::from_str(env, "F, 41, penicillin allergy"),
        condition: String::from_str(env, "acute sinusitis"),
        medicine: String::from_str(env, "azithromycin 250mg"),
        guide: String::from_str(env, "once daily for 5 days"),
    }
}

/// Creates a patient account holding `funds` in escrow.
pub fn funded_patient(ctx: &TestContext, funds: i128) -> Address {
    let patient = Address::generate(&ctx.env);
    ctx.client.create_patient_account(&patient);
    if funds > 0 {
        StellarAssetClient::new(&ctx.env, &ctx.token).mint(&patient, &funds);
        ctx.client.deposit(&patient, &funds);
    }
    patient
}

pub fn open_treatment(ctx: &TestContext, clinic: &Clinic, timeout: u64) -> u64 {
    ctx.client.create_treatment(
        &clinic.doctor,
        &clinic.doctor_cap,
        &clinic.hospital,
        &sample_notes(&ctx.env),
        &timeout,
    )
}

pub fn set_time(ctx: &TestContext, timestamp: u64) {
    ctx.env.ledger().set_timestamp(timestamp);
}

pub fn token_balance(ctx: &TestContext, who: &Address) -> i128 {
    TokenClient::new(&ctx.env, &ctx.token).balance(who)
}
