use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::constants::{DEFAULT_PAGE_SIZE, FILTER_ALL};
use crate::shared::types::PaginationQuery;

// ============================================================================
// Query Params
// ============================================================================

/// Filters for the installation list. Every filter is optional.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct InstallationListQuery {
    /// `all` (default), `menunggu` or `terpasang`
    pub status: Option<String>,
    /// Exact village name, or `all`
    pub village: Option<String>,
    /// Case-insensitive match on name, phone, address or village
    pub search: Option<String>,
    /// Month 1-12; 0 or absent means every month
    #[param(minimum = 0, maximum = 12)]
    pub month: Option<u32>,
    /// Registration year; absent means no date filter at all
    pub year: Option<i32>,
    /// Page number (1-indexed, default: 1)
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Number of items per page (default: 10, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,
}

impl InstallationListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn status_or_all(&self) -> &str {
        self.status.as_deref().unwrap_or(FILTER_ALL)
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Register a new customer; it starts as `menunggu`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstallationDto {
    #[validate(
        length(min = 1, max = 255, message = "Nama wajib diisi"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "crate::shared::validation::validate_phone"))]
    pub phone: String,

    #[validate(
        length(min = 1, message = "Alamat wajib diisi"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub address: String,

    #[validate(
        length(min = 1, message = "Desa wajib dipilih"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub village: String,

    #[validate(
        length(min = 1, message = "Agen wajib dipilih"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub agent: String,

    /// Defaults to today
    pub registration_date: Option<NaiveDate>,
}

/// Partial update of customer data; status is changed through confirmation only
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstallationDto {
    #[validate(
        length(min = 1, max = 255, message = "Nama tidak boleh kosong"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(custom(function = "crate::shared::validation::validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(
        length(min = 1, message = "Alamat tidak boleh kosong"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[validate(
        length(min = 1, message = "Desa tidak boleh kosong"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,

    #[validate(
        length(min = 1, message = "Agen tidak boleh kosong"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

/// Mark a customer as installed
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmInstallationDto {
    pub installation_date: NaiveDate,

    /// Free-form time of day, e.g. "10:30"
    #[validate(length(max = 16))]
    pub installation_time: Option<String>,

    #[validate(
        length(min = 1, max = 255, message = "Teknisi wajib diisi"),
        custom(function = "crate::shared::validation::not_blank")
    )]
    pub technician: String,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommissionDto {
    pub commission_paid: bool,
}
