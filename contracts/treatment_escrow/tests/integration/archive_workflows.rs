// Filing paid treatments into patient histories.

use super::{funded_patient, open_clinic, open_treatment, set_time, setup_test_env};
use treatment_escrow::{ContractError, ErrorKind};

#[test]
fn test_history_preserves_filing_order() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Willow");
    set_time(&ctx, 1_000);
    let patient = funded_patient(&ctx, 10_000);

    let first = open_treatment(&ctx, &clinic, 86_400);
    let second = open_treatment(&ctx, &clinic, 86_400);
    for t in [first, second] {
        ctx.client
            .set_price(&clinic.pharmacist, &clinic.pharmacist_cap, &t, &100);
        ctx.client.pay(&patient, &t);
    }

    ctx.client.archive_treatment(&patient, &second);
    ctx.client.archive_treatment(&patient, &first);

    let history = ctx.client.get_patient_treatments(&patient);
    assert_eq!(history.len(), 2);
    assert_eq!(history.get(0), Some(second));
    assert_eq!(history.get(1), Some(first));
    assert_eq!(ctx.client.get_patient(&patient).archived, 2);
    assert_eq!(ctx.client.get_treatment(&patient, &first).price, 100);
}

#[test]
fn test_archived_treatment_is_private_to_payer() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Juniper");
    set_time(&ctx, 1_000);
    let patient = funded_patient(&ctx, 1_000);
    let other = funded_patient(&ctx, 1_000);

    let t = open_treatment(&ctx, &clinic, 86_400);
    ctx.client
        .set_price(&clinic.pharmacist, &clinic.pharmacist_cap, &t, &100);
    ctx.client.pay(&patient, &t);

    let err = ctx
        .client
        .try_archive_treatment(&other, &t)
        .unwrap_err()
        .unwrap();
    assert_eq!(err, ContractError::NotYourTreatment);
    assert_eq!(err.kind(), ErrorKind::OwnershipMismatch);

    ctx.client.archive_treatment(&patient, &t);
    assert_eq!(
        ctx.client.try_get_treatment(&other, &t),
        Err(Ok(ContractError::TreatmentNotFound))
    );
}

#[test]
fn test_archive_does_not_expire() {
    let ctx = setup_test_env();
    let clinic = open_clinic(&ctx, "Cedar");
    set_time(&ctx, 1_000);
    let patient = funded_patient(&ctx, 1_000);
    let t = open_treatment(&ctx, &clinic, 100);
    ctx.client
        .set_price(&clinic.pharmacist, &clinic.pharmacist_cap, &t, &100);
    ctx.client.pay(&patient, &t);

    set_time(&ctx, 1_000_000);
    ctx.client.archive_treatment(&patient, &t);
    assert_eq!(ctx.client.get_patient_treatments(&patient).len(), 1);
}
