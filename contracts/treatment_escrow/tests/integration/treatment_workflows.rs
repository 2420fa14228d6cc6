// Treatment lifecycle workflows across hospitals and staff.

use super::{funded_patient, open_clinic, open_treatment, sample_notes, set_time, setup_test_env};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use treatment_escrow::{ContractError, ErrorKind, TreatmentStatus};

#[test]
fn test_two_hospitals_keep_separate_staff() {
    let ctx = setup_test_env();
    let north = open_clinic(&ctx, "North Clinic");
    let south = open_clinic(&ctx, "South Clinic");
    set_time(&ctx, 10_000);

    let t_north = open_treatment(&ctx, &north, 86_400);
    let t_south = open_treatment(&ctx, &south, 86_400);
    assert_eq!(ctx.client.get_treatment_count(), 2);

    let result = ctx.client.try_set_price(
        &south.pharmacist,
        &south.pharmacist_cap,
        &t_north,
        &100,
    );
    assert_eq!(result, Err(Ok(ContractError::PharmacistNotInHospital)));

    ctx.client
        .set_price(&north.pharmacist, &north.pharmacist_cap, &t_north, &100);
    ctx.client
        .set_price(&south.pharmacist, &south.pharmacist_cap, &t_south, &200);

    assert_eq!(ctx.client.get_treatment_record(&t_north).hospital, north.hospital);
    assert_eq!(ctx.client.get_treatment_price(&t_south), 200);
}

#[test]
fn test_expired_treatment_rejects_every_transition() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Lakeside");
    set_time(&ctx, 0);
    let t = open_treatment(&ctx, &clinic, 100);
    let patient = funded_patient(&ctx, 1_000);

    set_time(&ctx, 100);
    assert!(ctx.client.is_treatment_expired(&t));

    let price = ctx
        .client
        .try_set_price(&clinic.pharmacist, &clinic.pharmacist_cap, &t, &10)
        .unwrap_err()
        .unwrap();
    assert_eq!(price.kind(), ErrorKind::Expired);
    assert_eq!(
        ctx.client
            .try_assign_payer(&clinic.doctor, &clinic.doctor_cap, &t, &patient),
        Err(Ok(ContractError::TimedOut))
    );
    assert_eq!(
        ctx.client
            .try_set_timeout(&clinic.doctor, &clinic.doctor_cap, &t, &1_000),
        Err(Ok(ContractError::TimedOut))
    );

    let record = ctx.client.get_treatment_record(&t);
    assert_eq!(record.status, TreatmentStatus::Pending);
    assert_eq!(record.price, 0);
}

#[test]
fn test_priced_but_expired_cannot_be_paid() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Hillcrest");
    set_time(&ctx, 500);
    let t = open_treatment(&ctx, &clinic, 1_000);
    ctx.client
        .set_price(&clinic.pharmacist, &clinic.pharmacist_cap, &t, &300);
    let patient = funded_patient(&ctx, 1_000);

    set_time(&ctx, 1_500);
    assert_eq!(
        ctx.client.try_pay(&patient, &t),
        Err(Ok(ContractError::TimedOut))
    );
    assert_eq!(ctx.client.get_patient_balance(&patient), 1_000);
    assert_eq!(ctx.client.get_hospital_balance(&clinic.hospital), 0);
}

#[test]
fn test_extended_timeout_reopens_pricing_window() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Meadow");
    set_time(&ctx, 0);
    let t = open_treatment(&ctx, &clinic, 100);

    set_time(&ctx, 90);
    ctx.client
        .set_timeout(&clinic.doctor, &clinic.doctor_cap, &t, &10_000);

    set_time(&ctx, 5_000);
    ctx.client
        .set_price(&clinic.pharmacist, &clinic.pharmacist_cap, &t, &75);
    assert_eq!(ctx.client.get_treatment_record(&t).status, TreatmentStatus::Priced);
}

#[test]
fn test_transferred_doctor_cap_follows_new_holder() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Riverbend");
    let locum = Address::generate(&ctx.env);

    ctx.client
        .transfer_capability(&clinic.doctor, &clinic.doctor_cap, &locum);

    let result = ctx.client.try_create_treatment(
        &clinic.doctor,
        &clinic.doctor_cap,
        &clinic.hospital,
        &sample_notes(&ctx.env),
        &3_600,
    );
    assert_eq!(result, Err(Ok(ContractError::NotCapabilityHolder)));

    let t = ctx.client.create_treatment(
        &locum,
        &clinic.doctor_cap,
        &clinic.hospital,
        &sample_notes(&ctx.env),
        &3_600,
    );
    assert_eq!(ctx.client.get_treatment_record(&t).doctor, locum);
}
