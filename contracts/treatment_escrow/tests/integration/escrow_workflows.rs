// Fund movement between patients, hospital pools and the settlement token.

use super::{
    funded_patient, open_clinic, open_treatment, set_time, setup_test_env, token_balance,
};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::Address;
use treatment_escrow::ContractError;

#[test]
fn test_end_to_end_settlement_and_payout() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Central");
    set_time(&ctx, 1_000);
    let t = open_treatment(&ctx, &clinic, 86_400);

    set_time(&ctx, 2_000);
    ctx.client
        .set_price(&clinic.pharmacist, &clinic.pharmacist_cap, &t, &500);

    let patient = funded_patient(&ctx, 1_000);
    assert_eq!(token_balance(&ctx, &ctx.client.address), 1_000);

    set_time(&ctx, 3_000);
    ctx.client.pay(&patient, &t);

    // Settlement moves value internally; the contract still holds every token.
    assert_eq!(token_balance(&ctx, &ctx.client.address), 1_000);
    assert_eq!(ctx.client.get_patient_balance(&patient), 500);
    assert_eq!(ctx.client.get_hospital_balance(&clinic.hospital), 500);

    assert_eq!(ctx.client.withdraw(&patient), 500);
    assert_eq!(
        ctx.client
            .hospital_withdraw(&ctx.admin, &ctx.admin_cap, &clinic.hospital),
        500
    );
    assert_eq!(token_balance(&ctx, &patient), 500);
    assert_eq!(token_balance(&ctx, &ctx.admin), 500);
    assert_eq!(token_balance(&ctx, &ctx.client.address), 0);
}

#[test]
fn test_repeated_deposits_accumulate() {
    let ctx = setup_test_env();
    let patient = funded_patient(&ctx, 0);
    StellarAssetClient::new(&ctx.env, &ctx.token).mint(&patient, &900);

    assert_eq!(ctx.client.deposit(&patient, &300), 300);
    assert_eq!(ctx.client.deposit(&patient, &0), 300);
    assert_eq!(ctx.client.deposit(&patient, &600), 900);
    assert_eq!(token_balance(&ctx, &patient), 0);
}

#[test]
fn test_deposit_requires_account() {
    let ctx = setup_test_env();
    let stranger = Address::generate(&ctx.env);
    StellarAssetClient::new(&ctx.env, &ctx.token).mint(&stranger, &100);

    assert_eq!(
        ctx.client.try_deposit(&stranger, &100),
        Err(Ok(ContractError::PatientNotFound))
    );
    assert_eq!(token_balance(&ctx, &stranger), 100);
}

#[test]
fn test_failed_payment_changes_nothing() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Eastgate");
    set_time(&ctx, 1_000);
    let t = open_treatment(&ctx, &clinic, 86_400);
    ctx.client
        .set_price(&clinic.pharmacist, &clinic.pharmacist_cap, &t, &500);
    let patient = funded_patient(&ctx, 499);

    assert_eq!(
        ctx.client.try_pay(&patient, &t),
        Err(Ok(ContractError::InsufficientFunds))
    );

    let record = ctx.client.get_treatment_record(&t);
    assert!(!record.complete);
    assert_eq!(record.payer, None);
    assert_eq!(ctx.client.get_patient_balance(&patient), 499);

    // Topping up lets the same patient settle.
    StellarAssetClient::new(&ctx.env, &ctx.token).mint(&patient, &1);
    ctx.client.deposit(&patient, &1);
    ctx.client.pay(&patient, &t);
    assert_eq!(ctx.client.get_patient_balance(&patient), 0);
    assert_eq!(ctx.client.get_hospital_balance(&clinic.hospital), 500);
}

#[test]
fn test_pools_are_per_hospital() {
    let ctx = setup_test_env();
    let a = open_clinic(&ctx, "Alder");
    let b = open_clinic(&ctx, "Birch");
    set_time(&ctx, 1_000);
    let ta = open_treatment(&ctx, &a, 86_400);
    let tb = open_treatment(&ctx, &b, 86_400);
    ctx.client.set_price(&a.pharmacist, &a.pharmacist_cap, &ta, &120);
    ctx.client.set_price(&b.pharmacist, &b.pharmacist_cap, &tb, &80);

    let patient = funded_patient(&ctx, 1_000);
    ctx.client.pay(&patient, &ta);
    ctx.client.pay(&patient, &tb);

    assert_eq!(ctx.client.get_hospital_balance(&a.hospital), 120);
    assert_eq!(ctx.client.get_hospital_balance(&b.hospital), 80);
    assert_eq!(ctx.client.get_patient_balance(&patient), 800);

    ctx.client.hospital_withdraw(&ctx.admin, &ctx.admin_cap, &a.hospital);
    assert_eq!(ctx.client.get_hospital_balance(&a.hospital), 0);
    assert_eq!(ctx.client.get_hospital_balance(&b.hospital), 80);
}
