//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest company identifier accepted.
pub const MAX_COMPANY_ID_LEN: usize = 128;

/// Validates that a company ID is 1 to 128 ASCII letters, digits, `-` or `_`.
///
/// # Examples
///
/// ```ignore
/// validate_company_id("acme-42")   // Ok
/// validate_company_id("../admin")  // Err - path characters
/// validate_company_id("")          // Err - empty
/// ```
pub fn validate_company_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() || id.len() > MAX_COMPANY_ID_LEN {
        let mut err = ValidationError::new("company_id_length");
        err.message = Some(
            format!(
                "Company ID must be 1 to {MAX_COMPANY_ID_LEN} characters (got {})",
                id.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        let mut err = ValidationError::new("company_id_format");
        err.message =
            Some("Company ID may only contain ASCII letters, digits, '-' and '_'".into());
        return Err(err);
    }

    Ok(())
}
