use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Create or replace an agent. The name is stored upper-cased.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AgentRequestDto {
    #[validate(
        length(min = 1, max = 128, message = "Nama agen wajib diisi"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "crate::shared::validation::validate_phone"))]
    pub phone: Option<String>,

    #[validate(email(message = "Email tidak valid"))]
    pub email: Option<String>,

    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_contact_fields_are_checked_when_present() {
        let mut dto = AgentRequestDto {
            name: "yoga".to_string(),
            phone: None,
            email: None,
            address: None,
        };
        assert!(dto.validate().is_ok());

        dto.email = Some("bukan-email".to_string());
        assert!(dto.validate().is_err());

        dto.email = Some("yoga@example.com".to_string());
        dto.phone = Some("555".to_string());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let dto = AgentRequestDto {
            name: "   ".to_string(),
            phone: None,
            email: None,
            address: None,
        };
        assert!(dto.validate().is_err());
    }
}
