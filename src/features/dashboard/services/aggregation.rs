//! Pure dashboard aggregations over an already fetched installation list.
//!
//! Nothing here touches the network or the clock: callers pass `today`
//! explicitly so every view is reproducible from its inputs.

use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashMap;

use crate::features::agents::models::Agent;
use crate::features::dashboard::dtos::*;
use crate::features::installations::models::InstallationRecord;
use crate::features::villages::models::Village;
use crate::shared::constants::{MAX_WEEK_OF_MONTH, MONTH_NAMES, UNKNOWN_AGENT};

// ============================================================================
// Counts
// ============================================================================

fn count<'a, I>(records: I) -> StatusCountsDto
where
    I: IntoIterator<Item = &'a InstallationRecord>,
{
    let mut counts = StatusCountsDto::default();
    for record in records {
        if record.is_installed() {
            counts.installed += 1;
        } else {
            counts.awaiting += 1;
        }
    }
    counts.total = counts.awaiting + counts.installed;
    counts
}

pub fn overall_counts(records: &[InstallationRecord]) -> StatusCountsDto {
    count(records)
}

/// Records registered in `month`/`year` (`month == 0` keeps the whole year).
/// Undated records are always kept.
pub fn period_filter(records: &[InstallationRecord], month: u32, year: i32) -> Vec<InstallationRecord> {
    records
        .iter()
        .filter(|r| r.in_period(month, year))
        .cloned()
        .collect()
}

pub fn commission_summary(records: &[InstallationRecord]) -> CommissionSummaryDto {
    let mut summary = CommissionSummaryDto::default();
    for record in records.iter().filter(|r| r.is_installed()) {
        summary.installed += 1;
        if record.commission_paid {
            summary.paid += 1;
        } else {
            summary.unpaid += 1;
        }
    }
    summary
}

// ============================================================================
// Weekly trend
// ============================================================================

/// Week-of-month, 1-based, with Sunday as the first day of a week.
/// Weeks past the fifth fold into week 5.
pub fn week_of_month(date: NaiveDate) -> u32 {
    let offset = date
        .with_day(1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0);
    (date.day() + offset).div_ceil(7).min(MAX_WEEK_OF_MONTH)
}

fn last_day_of_month(month: u32, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
}

/// Per-week counts for one calendar month.
///
/// Weeks with no registrations are still listed when they have already
/// started relative to `today`, so a quiet week shows as zero instead of
/// disappearing. Future weeks only appear if they somehow hold records.
pub fn weekly_buckets(
    records: &[InstallationRecord],
    month: u32,
    year: i32,
    today: NaiveDate,
) -> Vec<WeeklyBucketDto> {
    let Some(last_day) = last_day_of_month(month, year) else {
        return Vec::new();
    };
    let last_week = week_of_month(last_day);

    let mut buckets: Vec<WeeklyBucketDto> = (1..=last_week)
        .map(|week| WeeklyBucketDto {
            week,
            total: 0,
            awaiting: 0,
            installed: 0,
        })
        .collect();

    for record in records.iter().filter(|r| r.registered_in(month, year)) {
        let Some(date) = record.registration_date else {
            continue;
        };
        let bucket = &mut buckets[(week_of_month(date) - 1) as usize];
        bucket.total += 1;
        if record.is_installed() {
            bucket.installed += 1;
        } else {
            bucket.awaiting += 1;
        }
    }

    let reached_week = match (year, month).cmp(&(today.year(), today.month())) {
        std::cmp::Ordering::Less => last_week,
        std::cmp::Ordering::Equal => week_of_month(today),
        std::cmp::Ordering::Greater => 0,
    };

    buckets
        .into_iter()
        .filter(|b| b.total > 0 || b.week <= reached_week)
        .collect()
}

// ============================================================================
// Month over month
// ============================================================================

pub fn month_label(month: u32, year: i32) -> String {
    let name = MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    format!("{} {}", name, year)
}

/// Calendar month before `month`/`year`, rolling January back to December
pub fn previous_month(month: u32, year: i32) -> (u32, i32) {
    if month <= 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

fn month_counts(records: &[InstallationRecord], month: u32, year: i32) -> MonthCountsDto {
    let counts = count(records.iter().filter(|r| r.registered_in(month, year)));
    MonthCountsDto {
        label: month_label(month, year),
        month,
        year,
        total: counts.total,
        awaiting: counts.awaiting,
        installed: counts.installed,
    }
}

pub fn month_over_month(records: &[InstallationRecord], reference: NaiveDate) -> MonthOverMonthDto {
    let (month, year) = (reference.month(), reference.year());
    let (prev_month, prev_year) = previous_month(month, year);
    MonthOverMonthDto {
        current: month_counts(records, month, year),
        previous: month_counts(records, prev_month, prev_year),
    }
}

// ============================================================================
// Rollups
// ============================================================================

/// Insertion-ordered accumulator keyed by trimmed name
struct Rollup<T> {
    index: HashMap<String, usize>,
    entries: Vec<T>,
}

impl<T> Rollup<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn seed(&mut self, name: &str, make: impl FnOnce(String) -> T) {
        let name = name.trim();
        if name.is_empty() || self.index.contains_key(name) {
            return;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(make(name.to_string()));
    }

    fn entry(&mut self, name: &str, make: impl FnOnce(String) -> T) -> &mut T {
        let name = match name.trim() {
            "" => UNKNOWN_AGENT,
            trimmed => trimmed,
        };
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(make(name.to_string()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[position]
    }

    fn into_ranked(self, total: impl Fn(&T) -> u64) -> Vec<T> {
        let mut entries: Vec<T> = self.entries.into_iter().filter(|e| total(e) > 0).collect();
        // stable: ties keep seed order, then first-encounter order
        entries.sort_by(|a, b| total(b).cmp(&total(a)));
        entries
    }
}

fn empty_agent(name: String) -> AgentRollupDto {
    AgentRollupDto {
        name,
        total: 0,
        awaiting: 0,
        installed: 0,
        phone: None,
        email: None,
    }
}

/// Installations per agent, busiest first. Agents without customers are
/// omitted; names not in `agents` still get an entry.
pub fn agent_rollup(records: &[InstallationRecord], agents: &[Agent]) -> Vec<AgentRollupDto> {
    let mut rollup = Rollup::new();
    for agent in agents {
        rollup.seed(&agent.name, |name| AgentRollupDto {
            phone: agent.phone.clone(),
            email: agent.email.clone(),
            ..empty_agent(name)
        });
    }

    for record in records {
        let entry = rollup.entry(&record.agent, empty_agent);
        entry.total += 1;
        if record.is_installed() {
            entry.installed += 1;
        } else {
            entry.awaiting += 1;
        }
    }

    rollup.into_ranked(|e| e.total)
}

/// Percentage change from `last` to `current`, guarded against division by zero
pub fn growth_rate(current: u64, last: u64) -> f64 {
    if last > 0 {
        (current as f64 - last as f64) / last as f64 * 100.0
    } else if current > 0 {
        100.0
    } else {
        0.0
    }
}

fn empty_village(name: String) -> VillageRollupDto {
    VillageRollupDto {
        name,
        kecamatan: None,
        kabupaten: None,
        current_month: 0,
        last_month: 0,
        total: 0,
        growth: 0.0,
    }
}

/// Installations per village with this-month vs last-month growth
/// relative to `reference`.
pub fn village_rollup(
    records: &[InstallationRecord],
    villages: &[Village],
    reference: NaiveDate,
) -> Vec<VillageRollupDto> {
    rollup_villages(records, villages, reference, |_| true)
}

/// Village rollup whose `total` is scoped to the `month`/`year` period.
/// Growth counters always read the full record list so the month before
/// `reference` is counted even when it falls outside the period.
pub fn village_rollup_for_period(
    records: &[InstallationRecord],
    villages: &[Village],
    month: u32,
    year: i32,
    reference: NaiveDate,
) -> Vec<VillageRollupDto> {
    rollup_villages(records, villages, reference, |record| {
        record.in_period(month, year)
    })
}

fn rollup_villages(
    records: &[InstallationRecord],
    villages: &[Village],
    reference: NaiveDate,
    counts_toward_total: impl Fn(&InstallationRecord) -> bool,
) -> Vec<VillageRollupDto> {
    let (month, year) = (reference.month(), reference.year());
    let (prev_month, prev_year) = previous_month(month, year);

    let mut rollup = Rollup::new();
    for village in villages {
        rollup.seed(&village.name, |name| VillageRollupDto {
            kecamatan: village.kecamatan.clone(),
            kabupaten: village.kabupaten.clone(),
            ..empty_village(name)
        });
    }

    for record in records {
        let entry = rollup.entry(&record.village, empty_village);
        if counts_toward_total(record) {
            entry.total += 1;
        }
        if record.registered_in(month, year) {
            entry.current_month += 1;
        } else if record.registered_in(prev_month, prev_year) {
            entry.last_month += 1;
        }
    }

    let mut ranked = rollup.into_ranked(|e| e.total);
    for entry in &mut ranked {
        entry.growth = growth_rate(entry.current_month, entry.last_month);
    }
    ranked
}

// ============================================================================
// Composite
// ============================================================================

/// Date that anchors month-relative views for a selected period.
///
/// The current month uses `today` itself; another month uses its first day;
/// a whole past or future year uses its last or first day.
pub fn reference_date(month: u32, year: i32, today: NaiveDate) -> NaiveDate {
    if month == 0 {
        return match year.cmp(&today.year()) {
            std::cmp::Ordering::Equal => today,
            std::cmp::Ordering::Less => NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today),
            std::cmp::Ordering::Greater => NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today),
        };
    }
    if month == today.month() && year == today.year() {
        return today;
    }
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

pub fn dashboard_stats(
    records: &[InstallationRecord],
    agents: &[Agent],
    villages: &[Village],
    month: u32,
    year: i32,
    today: NaiveDate,
) -> DashboardStatsDto {
    let period = period_filter(records, month, year);
    let reference = reference_date(month, year, today);

    DashboardStatsDto {
        period: PeriodDto { month, year },
        counts: overall_counts(&period),
        weekly: weekly_buckets(records, reference.month(), reference.year(), today),
        month_over_month: month_over_month(records, today),
        agents: agent_rollup(&period, agents),
        villages: village_rollup_for_period(records, villages, month, year, reference),
        commission: commission_summary(&period),
    }
}

pub fn dashboard_summary(records: &[InstallationRecord], today: NaiveDate) -> DashboardSummaryDto {
    DashboardSummaryDto {
        counts: overall_counts(records),
        month_over_month: month_over_month(records, today),
        commission: commission_summary(records),
    }
}
