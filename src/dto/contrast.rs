use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::theme::contrast::ContrastCheck;

/// Ad-hoc contrast check between two hex colors.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ContrastRequest {
    /// Background color, `#RGB` or `#RRGGBB`.
    #[validate(length(min = 1, max = 16))]
    pub background: String,
    /// Candidate foreground color.
    #[validate(length(max = 16))]
    pub foreground: String,
    /// Required ratio; the configured minimum when omitted.
    #[validate(range(min = 1.0, max = 21.0))]
    pub min_ratio: Option<f64>,
}

/// Foreground to use and the ratio it achieves.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContrastResponse {
    /// Adjusted foreground (`#RRGGBB`), or the untouched input for an unreadable background.
    pub foreground: String,
    /// Achieved ratio, absent when the background could not be parsed.
    pub ratio: Option<f64>,
    /// Whether the foreground had to change.
    pub adjusted: bool,
    /// Ratio that was enforced.
    pub min_ratio: f64,
}

impl ContrastResponse {
    /// Wrap an enforcement result.
    pub fn new(check: ContrastCheck, min_ratio: f64) -> Self {
        Self {
            foreground: check.foreground,
            ratio: check.ratio,
            adjusted: check.adjusted,
            min_ratio,
        }
    }
}
