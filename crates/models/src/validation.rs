//! Field-format checks for caller input.
//!
//! The record store accepts whatever it is given; screens and other callers
//! run these before submitting.

use crate::errors::ModelError;

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("{field} required")));
    }
    Ok(())
}

/// Two ASCII letters, either case.
pub fn validate_state(state: &str) -> Result<(), ModelError> {
    if state.len() == 2 && state.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ModelError::validation("state must be 2 letters"))
    }
}

pub fn validate_zip(zip: &str) -> Result<(), ModelError> {
    if all_digits(zip, 5) { Ok(()) } else { Err(ModelError::validation("zip must be 5 digits")) }
}

pub fn validate_service_code(code: &str) -> Result<(), ModelError> {
    if all_digits(code, 6) { Ok(()) } else { Err(ModelError::validation("service code must be 6 digits")) }
}

pub fn validate_provider_number(number: &str) -> Result<(), ModelError> {
    if all_digits(number, 9) { Ok(()) } else { Err(ModelError::validation("provider number must be 9 digits")) }
}

pub fn validate_member_id(member_id: &str) -> Result<(), ModelError> {
    if all_digits(member_id, 9) { Ok(()) } else { Err(ModelError::validation("member id must be 9 digits")) }
}

/// Name, address, city, state and zip as the add member / add provider forms check them.
pub fn validate_contact(name: &str, address: &str, city: &str, state: &str, zip: &str) -> Result<(), ModelError> {
    validate_required("name", name)?;
    validate_required("address", address)?;
    validate_required("city", city)?;
    validate_state(state)?;
    validate_zip(zip)
}
