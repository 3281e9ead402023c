/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Administrator role - can manage users, agents, villages and read the activity log
pub const ROLE_ADMINISTRATOR: &str = "Administrator";

/// Regular operator role - registers customers and confirms installations
pub const ROLE_USER: &str = "User";

// =============================================================================
// FILTER & LABEL CONSTANTS
// =============================================================================

/// Filter value meaning "do not constrain this field"
pub const FILTER_ALL: &str = "all";

/// Rollup label for installations that carry no agent name
pub const UNKNOWN_AGENT: &str = "Unknown";

/// Highest week-of-month bucket; later days fold into it
pub const MAX_WEEK_OF_MONTH: u32 = 5;

/// Indonesian month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];
