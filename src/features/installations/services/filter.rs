use crate::core::error::{AppError, Result};
use crate::features::installations::dtos::InstallationListQuery;
use crate::features::installations::models::{InstallationRecord, InstallationStatus};
use crate::shared::constants::FILTER_ALL;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InstallationStatus),
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case(FILTER_ALL) {
            return Some(StatusFilter::All);
        }
        InstallationStatus::parse(raw).map(StatusFilter::Only)
    }

    fn matches(&self, status: InstallationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Criteria for narrowing the installation list. All conditions must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallationFilter {
    pub status: StatusFilter,
    /// `None` accepts every village
    pub village: Option<String>,
    /// Lower-cased search term; empty accepts everything
    pub search: String,
    /// 0 means every month of `year`
    pub month: u32,
    /// `None` disables the date constraint
    pub year: Option<i32>,
}

impl InstallationFilter {
    pub fn from_query(query: &InstallationListQuery) -> Result<Self> {
        let status = StatusFilter::parse(query.status_or_all()).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unknown status '{}', expected all, menunggu or terpasang",
                query.status_or_all()
            ))
        })?;

        let month = query.month.unwrap_or(0);
        if month > 12 {
            return Err(AppError::BadRequest(format!(
                "Invalid month {}, expected 0-12",
                month
            )));
        }

        let village = query
            .village
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(FILTER_ALL))
            .map(str::to_string);

        Ok(Self {
            status,
            village,
            search: query
                .search
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            month,
            year: query.year,
        })
    }

    fn matches_search(&self, record: &InstallationRecord) -> bool {
        self.search.is_empty()
            || [&record.name, &record.phone, &record.address, &record.village]
                .iter()
                .any(|field| field.to_lowercase().contains(&self.search))
    }

    pub fn matches(&self, record: &InstallationRecord) -> bool {
        self.status.matches(record.status)
            && self.village.as_deref().is_none_or(|v| record.village.trim() == v)
            && self.matches_search(record)
            && self.year.is_none_or(|year| record.in_period(self.month, year))
    }
}

/// Visible subset of `records`, in input order
pub fn filter<'a>(
    records: &'a [InstallationRecord],
    criteria: &InstallationFilter,
) -> Vec<&'a InstallationRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
