//! Delete Record Use Case
//!
//! Records can only be removed on the day they were created.

use std::sync::Arc;

use kernel::id::EmissionRecordId;
use kernel::time_window::TimeWindow;

use crate::domain::entities::EmissionRecord;
use crate::domain::repository::EmissionRecordRepository;
use crate::error::{EmissionError, EmissionResult};

pub struct DeleteTodayRecordUseCase<R>
where
    R: EmissionRecordRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteTodayRecordUseCase<R>
where
    R: EmissionRecordRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, raw_id: &str) -> EmissionResult<EmissionRecord> {
        // Ids that cannot exist are reported like any other miss.
        let Ok(id) = EmissionRecordId::parse(raw_id) else {
            return Err(EmissionError::NotFoundToday);
        };
        self.execute_within(id, &TimeWindow::today()?).await
    }

    pub async fn execute_within(
        &self,
        id: EmissionRecordId,
        today: &TimeWindow,
    ) -> EmissionResult<EmissionRecord> {
        let deleted = self
            .repo
            .delete_created_within(id, today)
            .await?
            .ok_or(EmissionError::NotFoundToday)?;

        tracing::info!(record_id = %id, category = %deleted.category, "Emission record deleted");

        Ok(deleted)
    }
}
