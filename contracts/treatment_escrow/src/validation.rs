use soroban_sdk::String;

use crate::errors::ContractError;
use crate::treatment::ClinicalNotes;

const MIN_NAME_LEN: u32 = 2;
const MAX_NAME_LEN: u32 = 64;

pub const MAX_TEXT_LEN: u32 = 1024;

/// Validate a hospital display name.
/// Names must be between MIN_NAME_LEN and MAX_NAME_LEN printable ASCII bytes.
pub fn validate_name(name: &String) -> Result<(), ContractError> {
    let len = name.len();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; MAX_NAME_LEN as usize];
    name.copy_into_slice(&mut buf[..len as usize]);

    if buf[..len as usize].iter().any(|b| !(32..=126).contains(b)) {
        return Err(ContractError::InvalidInput);
    }

    Ok(())
}

/// Validate one free-text clinical field: non-empty, not blank, bounded.
pub fn validate_text(text: &String) -> Result<(), ContractError> {
    let len = text.len();
    if len == 0 || len > MAX_TEXT_LEN {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; MAX_TEXT_LEN as usize];
    text.copy_into_slice(&mut buf[..len as usize]);

    if buf[..len as usize].iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ContractError::InvalidInput);
    }

    Ok(())
}

pub fn validate_notes(notes: &ClinicalNotes) -> Result<(), ContractError> {
    validate_text(&notes.patient_info)?;
    validate_text(&notes.condition)?;
    validate_text(&notes.medicine)?;
    validate_text(&notes.guide)
}

/// Validate a treatment timeout window against the configured maximum.
pub fn validate_timeout(timeout: u64, max_timeout: u64) -> Result<(), ContractError> {
    if timeout == 0 || timeout > max_timeout {
        return Err(ContractError::InvalidTimeout);
    }
    Ok(())
}

/// Token amounts are never negative.
pub fn validate_amount(amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}
