use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Installation lifecycle status. Moves from `menunggu` to `terpasang` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum InstallationStatus {
    #[serde(rename = "menunggu")]
    Awaiting,
    #[serde(rename = "terpasang")]
    Installed,
}

impl InstallationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallationStatus::Awaiting => "menunggu",
            InstallationStatus::Installed => "terpasang",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "menunggu" | "awaiting" => Some(InstallationStatus::Awaiting),
            "terpasang" | "installed" => Some(InstallationStatus::Installed),
            _ => None,
        }
    }
}

/// Details captured when an installation is confirmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallationDetails {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub technician: Option<String>,
    pub notes: Option<String>,
}

/// Canonical customer installation record ("pelanggan")
///
/// `installation` is `Some` exactly when `status` is `Installed`, and
/// `commission_paid` is only ever true for installed records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallationRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub village: String,
    pub agent: String,
    pub registration_date: Option<NaiveDate>,
    pub status: InstallationStatus,
    pub installation: Option<InstallationDetails>,
    pub commission_paid: bool,
}

impl InstallationRecord {
    pub fn is_installed(&self) -> bool {
        self.status == InstallationStatus::Installed
    }

    /// Period match on the registration date. `month == 0` means every month
    /// of `year`. Records without a usable date always match.
    pub fn in_period(&self, month: u32, year: i32) -> bool {
        match self.registration_date {
            None => true,
            Some(date) => date.year() == year && (month == 0 || date.month() == month),
        }
    }

    /// Strict calendar-month match; undated records never match
    pub fn registered_in(&self, month: u32, year: i32) -> bool {
        self.registration_date
            .is_some_and(|date| date.year() == year && date.month() == month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{awaiting, date};

    #[test]
    fn test_status_parse() {
        assert_eq!(
            InstallationStatus::parse("Terpasang"),
            Some(InstallationStatus::Installed)
        );
        assert_eq!(
            InstallationStatus::parse(" menunggu "),
            Some(InstallationStatus::Awaiting)
        );
        assert_eq!(InstallationStatus::parse("batal"), None);
    }

    #[test]
    fn test_in_period() {
        let record = awaiting("1", "YOGA", "A", Some(date(2024, 5, 1)));
        assert!(record.in_period(5, 2024));
        assert!(record.in_period(0, 2024));
        assert!(!record.in_period(6, 2024));
        assert!(!record.in_period(0, 2023));
    }

    #[test]
    fn test_undated_record_matches_any_period_but_no_month() {
        let record = awaiting("1", "YOGA", "A", None);
        assert!(record.in_period(2, 1999));
        assert!(!record.registered_in(2, 1999));
    }

    #[test]
    fn test_status_wire_names() {
        let record = awaiting("9", "YOGA", "A", Some(date(2024, 5, 1)));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "menunggu");
        assert_eq!(json["registrationDate"], "2024-05-01");
        assert_eq!(json["commissionPaid"], false);
    }
}
