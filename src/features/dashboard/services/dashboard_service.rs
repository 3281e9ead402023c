use chrono::{Datelike, Local, NaiveDate};
use std::sync::Arc;

use super::aggregation;
use crate::core::error::{AppError, Result};
use crate::features::agents::models::Agent;
use crate::features::dashboard::dtos::*;
use crate::features::installations::models::InstallationRecord;
use crate::features::villages::models::Village;
use crate::modules::record_store::{or_empty, RecordStore};

/// Lists fetched once per dashboard request
struct Snapshot {
    installations: Vec<InstallationRecord>,
    agents: Vec<Agent>,
    villages: Vec<Village>,
}

/// Service for dashboard views
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Resolve query params into (month, year); month 0 is the whole year
    pub fn resolve_period(params: &DashboardQueryParams, today: NaiveDate) -> Result<(u32, i32)> {
        let month = params.month.unwrap_or(0);
        if month > 12 {
            return Err(AppError::BadRequest(format!(
                "Invalid month {}, expected 0-12",
                month
            )));
        }
        Ok((month, params.year.unwrap_or_else(|| today.year())))
    }

    /// Fetch the three lists concurrently. Failed fetches become empty lists.
    async fn snapshot(&self, token: &str) -> Snapshot {
        let (installations, agents, villages) = futures::join!(
            self.store.list_installations(token),
            self.store.list_agents(token),
            self.store.list_villages(token),
        );

        Snapshot {
            installations: or_empty("installation", installations),
            agents: or_empty("agent", agents),
            villages: or_empty("village", villages),
        }
    }

    // ========================================================================
    // Summary (lightweight stats for header)
    // ========================================================================

    pub async fn get_summary(&self, token: &str) -> DashboardSummaryDto {
        let installations = or_empty(
            "installation",
            self.store.list_installations(token).await,
        );
        aggregation::dashboard_summary(&installations, Self::today())
    }

    // ========================================================================
    // Period views
    // ========================================================================

    pub async fn get_stats(&self, token: &str, params: &DashboardQueryParams) -> Result<DashboardStatsDto> {
        let today = Self::today();
        let (month, year) = Self::resolve_period(params, today)?;
        let snapshot = self.snapshot(token).await;

        tracing::debug!(
            "Computing dashboard stats for {}/{} over {} installations",
            month,
            year,
            snapshot.installations.len()
        );

        Ok(aggregation::dashboard_stats(
            &snapshot.installations,
            &snapshot.agents,
            &snapshot.villages,
            month,
            year,
            today,
        ))
    }

    pub async fn get_agent_rollup(
        &self,
        token: &str,
        params: &DashboardQueryParams,
    ) -> Result<Vec<AgentRollupDto>> {
        let (month, year) = Self::resolve_period(params, Self::today())?;
        let (installations, agents) = futures::join!(
            self.store.list_installations(token),
            self.store.list_agents(token),
        );

        let period = aggregation::period_filter(&or_empty("installation", installations), month, year);
        Ok(aggregation::agent_rollup(&period, &or_empty("agent", agents)))
    }

    pub async fn get_village_rollup(
        &self,
        token: &str,
        params: &DashboardQueryParams,
    ) -> Result<Vec<VillageRollupDto>> {
        let today = Self::today();
        let (month, year) = Self::resolve_period(params, today)?;
        let (installations, villages) = futures::join!(
            self.store.list_installations(token),
            self.store.list_villages(token),
        );

        Ok(aggregation::village_rollup_for_period(
            &or_empty("installation", installations),
            &or_empty("village", villages),
            month,
            year,
            aggregation::reference_date(month, year, today),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::record_store::memory::InMemoryRecordStore;
    use crate::shared::test_helpers::{awaiting, date, installed, TEST_BEARER_TOKEN};
    use tokio_test::{assert_err, assert_ok};

    fn service(store: InMemoryRecordStore) -> DashboardService {
        DashboardService::new(Arc::new(store))
    }

    #[test]
    fn test_resolve_period_defaults() {
        let today = date(2024, 6, 15);
        let params = DashboardQueryParams::default();
        assert_eq!(assert_ok!(DashboardService::resolve_period(&params, today)), (0, 2024));

        let params = DashboardQueryParams {
            month: Some(13),
            year: None,
        };
        assert_err!(DashboardService::resolve_period(&params, today));
    }

    #[tokio::test]
    async fn test_rejected_token_yields_empty_summary() {
        let store = InMemoryRecordStore::new()
            .with_installations(vec![awaiting("1", "YOGA", "A", None)])
            .rejecting_token();

        let summary = service(store).get_summary(TEST_BEARER_TOKEN).await;
        assert_eq!(summary.counts, StatusCountsDto::default());
    }

    #[tokio::test]
    async fn test_agent_rollup_over_whole_year() {
        let year = DashboardService::today().year();
        let store = InMemoryRecordStore::new().with_installations(vec![
            awaiting("1", "YOGA", "A", Some(date(year, 1, 10))),
            installed("2", "YOGA", "A", Some(date(year, 2, 10))),
            installed("3", "BAYU", "A", Some(date(year - 1, 2, 10))),
        ]);

        let rollup = assert_ok!(
            service(store)
                .get_agent_rollup(TEST_BEARER_TOKEN, &DashboardQueryParams::default())
                .await
        );
        assert_eq!(rollup.len(), 1);
        assert_eq!((rollup[0].awaiting, rollup[0].installed), (1, 1));
    }

    #[tokio::test]
    async fn test_village_rollup_for_month_counts_previous_month() {
        let year = DashboardService::today().year() - 1;
        let store = InMemoryRecordStore::new().with_installations(vec![
            awaiting("1", "YOGA", "Sukamaju", Some(date(year, 2, 10))),
            installed("2", "YOGA", "Sukamaju", Some(date(year, 3, 10))),
        ]);

        let params = DashboardQueryParams {
            month: Some(3),
            year: Some(year),
        };
        let rollup = assert_ok!(
            service(store)
                .get_village_rollup(TEST_BEARER_TOKEN, &params)
                .await
        );
        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].total, 1);
        assert_eq!((rollup[0].current_month, rollup[0].last_month), (1, 1));
        assert_eq!(rollup[0].growth, 0.0);
    }
}
