//! Report source over the emission and sink stores

use std::sync::Arc;

use emission::{EmissionCategory, EmissionRecord, EmissionRecordRepository};
use kernel::time_window::TimeWindow;
use sink::{CarbonSink, SinkKind, SinkRepository};

use crate::domain::source::ReportSource;
use crate::error::ReportResult;

pub struct RepositorySource<E, S> {
    emissions: Arc<E>,
    sinks: Arc<S>,
}

impl<E, S> RepositorySource<E, S> {
    pub fn new(emissions: E, sinks: S) -> Self {
        Self {
            emissions: Arc::new(emissions),
            sinks: Arc::new(sinks),
        }
    }
}

impl<E, S> Clone for RepositorySource<E, S> {
    fn clone(&self) -> Self {
        Self {
            emissions: self.emissions.clone(),
            sinks: self.sinks.clone(),
        }
    }
}

impl<E, S> ReportSource for RepositorySource<E, S>
where
    E: EmissionRecordRepository + Sync,
    S: SinkRepository + Sync,
{
    async fn emission_records(
        &self,
        category: EmissionCategory,
        window: &TimeWindow,
    ) -> ReportResult<Vec<EmissionRecord>> {
        Ok(self.emissions.find_in_window(category, window).await?)
    }

    async fn existing_sinks(&self, window: &TimeWindow) -> ReportResult<Vec<CarbonSink>> {
        Ok(self.sinks.find_in_window(SinkKind::Existing, window).await?)
    }
}
