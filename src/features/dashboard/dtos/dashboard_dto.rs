use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============================================================================
// Query Params
// ============================================================================

/// Period selection for dashboard views
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DashboardQueryParams {
    /// Month 1-12; 0 or absent means every month of the year
    #[param(minimum = 0, maximum = 12)]
    pub month: Option<u32>,
    /// Calendar year; defaults to the current year
    pub year: Option<i32>,
}

// ============================================================================
// Counts
// ============================================================================

/// Installation counts by status. `total` is always `awaiting + installed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCountsDto {
    pub total: u64,
    pub awaiting: u64,
    pub installed: u64,
}

/// One week-of-month bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeeklyBucketDto {
    pub week: u32,
    pub total: u64,
    pub awaiting: u64,
    pub installed: u64,
}

/// Counts for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthCountsDto {
    /// Human label, e.g. "Juni 2024"
    pub label: String,
    pub month: u32,
    pub year: i32,
    pub total: u64,
    pub awaiting: u64,
    pub installed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthOverMonthDto {
    pub current: MonthCountsDto,
    pub previous: MonthCountsDto,
}

// ============================================================================
// Rollups
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AgentRollupDto {
    pub name: String,
    pub total: u64,
    pub awaiting: u64,
    pub installed: u64,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VillageRollupDto {
    pub name: String,
    pub kecamatan: Option<String>,
    pub kabupaten: Option<String>,
    pub current_month: u64,
    pub last_month: u64,
    pub total: u64,
    /// Month-over-month growth in percent; never NaN or infinite
    pub growth: f64,
}

/// Commission state of installed customers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommissionSummaryDto {
    pub installed: u64,
    pub paid: u64,
    pub unpaid: u64,
}

// ============================================================================
// Composite views
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PeriodDto {
    /// 0 means the whole year
    pub month: u32,
    pub year: i32,
}

/// Lightweight header stats over every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub counts: StatusCountsDto,
    pub month_over_month: MonthOverMonthDto,
    pub commission: CommissionSummaryDto,
}

/// Full dashboard for a selected period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStatsDto {
    pub period: PeriodDto,
    pub counts: StatusCountsDto,
    pub weekly: Vec<WeeklyBucketDto>,
    pub month_over_month: MonthOverMonthDto,
    pub agents: Vec<AgentRollupDto>,
    pub villages: Vec<VillageRollupDto>,
    pub commission: CommissionSummaryDto,
}
