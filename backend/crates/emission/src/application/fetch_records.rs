//! Fetch Records Use Case
//!
//! Loads every category for one window. Categories are queried
//! concurrently; any failure fails the whole request.

use std::sync::Arc;

use kernel::time_window::{NamedRange, TimeWindow};

use crate::domain::entities::{CategoryRecords, EmissionCategory};
use crate::domain::repository::EmissionRecordRepository;
use crate::error::EmissionResult;

pub struct FetchRecordsUseCase<R>
where
    R: EmissionRecordRepository,
{
    repo: Arc<R>,
}

impl<R> FetchRecordsUseCase<R>
where
    R: EmissionRecordRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// One calendar day (`YYYY-MM-DD`), server-local time
    pub async fn for_date(&self, date: &str) -> EmissionResult<CategoryRecords> {
        let window = TimeWindow::for_date(date)?;
        self.execute(&window).await
    }

    /// Inclusive calendar-date range, server-local time
    pub async fn for_date_range(&self, start: &str, end: &str) -> EmissionResult<CategoryRecords> {
        let window = TimeWindow::from_date_strings(start, end)?;
        self.execute(&window).await
    }

    /// Relative window ending now
    pub async fn for_named_range(&self, range: NamedRange) -> EmissionResult<CategoryRecords> {
        self.execute(&range.current_window()).await
    }

    pub async fn execute(&self, window: &TimeWindow) -> EmissionResult<CategoryRecords> {
        let repo = &self.repo;
        let (electricity, fuel_combustion, shipping, explosion, coal_burn, methane) = tokio::try_join!(
            repo.find_in_window(EmissionCategory::Electricity, window),
            repo.find_in_window(EmissionCategory::FuelCombustion, window),
            repo.find_in_window(EmissionCategory::Shipping, window),
            repo.find_in_window(EmissionCategory::Explosion, window),
            repo.find_in_window(EmissionCategory::CoalBurn, window),
            repo.find_in_window(EmissionCategory::Methane, window),
        )?;

        let records = CategoryRecords {
            electricity,
            fuel_combustion,
            shipping,
            explosion,
            coal_burn,
            methane,
        };

        tracing::debug!(%window, records = records.total_len(), "Fetched emission records");

        Ok(records)
    }
}
