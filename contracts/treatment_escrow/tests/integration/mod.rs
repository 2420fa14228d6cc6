// Workflow tests driving the contract through its client, the way a
// hospital deployment would.

mod archive_workflows;
mod escrow_workflows;
mod treatment_workflows;

pub use super::common::{
    funded_patient, open_clinic, open_treatment, sample_notes, set_time, setup_test_env,
    token_balance,
};
