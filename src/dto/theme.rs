use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::{format_timestamp, validation::validate_company_id},
    services::theme_controller::{ThemeOptions, ThemeSnapshot},
    theme::builder::ThemeVariableSet,
};

/// Payload used to point the theme at a new logo.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetLogoRequest {
    /// Logo reference (`http(s)://`, `file://` or a local path). Empty or
    /// absent leaves the current theme untouched.
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub logo_url: Option<String>,
    /// Save the resulting theme on the company profile.
    #[serde(default)]
    pub persist: bool,
    /// Company whose profile receives the theme.
    #[serde(default)]
    #[validate(custom(function = "validate_company_id"))]
    pub company_id: Option<String>,
}

impl SetLogoRequest {
    /// Options forwarded to the controller.
    pub fn options(&self) -> ThemeOptions {
        ThemeOptions {
            persist: self.persist,
            company_id: self.company_id.clone(),
        }
    }
}

/// Optional payload of the refresh route.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct RefreshRequest {
    /// Save the resulting theme on the company profile.
    #[serde(default)]
    pub persist: bool,
    /// Company whose profile receives the theme.
    #[serde(default)]
    #[validate(custom(function = "validate_company_id"))]
    pub company_id: Option<String>,
}

impl From<RefreshRequest> for ThemeOptions {
    fn from(value: RefreshRequest) -> Self {
        Self {
            persist: value.persist,
            company_id: value.company_id,
        }
    }
}

/// Acknowledgement returned by the logo and refresh routes.
#[derive(Debug, Serialize, ToSchema)]
pub struct ThemeRunResponse {
    /// Whether a new run was started.
    pub started: bool,
    /// Token of the run started by this request.
    pub run: Option<u64>,
    /// Phase right after the request was handled.
    pub status: String,
}

/// Current theme state as exposed to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ThemeSnapshotResponse {
    /// `idle`, `loading`, `ready` or `error`.
    pub status: String,
    /// Latest run token.
    pub run: u64,
    /// Logo of the latest run.
    pub logo_url: Option<String>,
    /// Published variables, name to `H S% L%` triplet.
    #[schema(value_type = Option<Object>)]
    pub theme_variables: Option<ThemeVariableSet>,
    /// RFC 3339 time the variables were applied.
    pub applied_at: Option<String>,
    /// True while a run is in flight.
    pub loading: bool,
    /// User-facing message of the latest failure.
    pub error: Option<String>,
}

impl From<ThemeSnapshot> for ThemeSnapshotResponse {
    fn from(snapshot: ThemeSnapshot) -> Self {
        Self {
            status: snapshot.status.as_str().to_string(),
            run: snapshot.run,
            logo_url: snapshot.logo_url,
            theme_variables: snapshot.theme_variables,
            applied_at: snapshot.applied_at.map(format_timestamp),
            loading: snapshot.loading,
            error: snapshot.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_request_defaults_optional_fields() {
        let request: SetLogoRequest =
            serde_json::from_str(r#"{ "logo_url": "https://cdn.example.com/logo.png" }"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.options(), ThemeOptions::default());
    }

    #[test]
    fn empty_company_id_is_rejected() {
        let request: SetLogoRequest =
            serde_json::from_str(r#"{ "logo_url": "x", "persist": true, "company_id": "" }"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn path_like_company_id_is_rejected() {
        let request: RefreshRequest =
            serde_json::from_str(r#"{ "persist": true, "company_id": "../admin/users?x=" }"#).unwrap();
        assert!(request.validate().is_err());
    }
}
