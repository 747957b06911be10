//! Fetch Sinks Use Case

use std::sync::Arc;

use kernel::time_window::TimeWindow;

use crate::domain::entities::{CarbonSink, SinkKind};
use crate::domain::repository::SinkRepository;
use crate::error::SinkResult;

pub struct FetchSinksUseCase<R>
where
    R: SinkRepository,
{
    repo: Arc<R>,
}

impl<R> FetchSinksUseCase<R>
where
    R: SinkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn for_date(&self, kind: SinkKind, date: &str) -> SinkResult<Vec<CarbonSink>> {
        let window = TimeWindow::for_date(date)?;
        self.execute(kind, &window).await
    }

    pub async fn for_date_range(
        &self,
        kind: SinkKind,
        start: &str,
        end: &str,
    ) -> SinkResult<Vec<CarbonSink>> {
        let window = TimeWindow::from_date_strings(start, end)?;
        self.execute(kind, &window).await
    }

    pub async fn execute(&self, kind: SinkKind, window: &TimeWindow) -> SinkResult<Vec<CarbonSink>> {
        let sinks = self.repo.find_in_window(kind, window).await?;
        tracing::debug!(%kind, %window, count = sinks.len(), "Fetched carbon sinks");
        Ok(sinks)
    }
}
