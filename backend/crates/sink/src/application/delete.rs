//! Delete Sink Use Case
//!
//! Planned sinks can only be removed on the day they were registered.
//! Existing sinks can be removed at any time.

use std::sync::Arc;

use kernel::id::SinkId;
use kernel::time_window::TimeWindow;

use crate::domain::entities::{CarbonSink, SinkKind};
use crate::domain::repository::SinkRepository;
use crate::error::{SinkError, SinkResult};

pub struct DeleteSinkUseCase<R>
where
    R: SinkRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteSinkUseCase<R>
where
    R: SinkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, kind: SinkKind, raw_id: &str) -> SinkResult<CarbonSink> {
        let Ok(id) = SinkId::parse(raw_id) else {
            return Err(SinkError::NotFound(kind));
        };

        let today = match kind {
            SinkKind::Planned => Some(TimeWindow::today()?),
            SinkKind::Existing => None,
        };

        let deleted = self
            .repo
            .delete(kind, id, today.as_ref())
            .await?
            .ok_or(SinkError::NotFound(kind))?;

        tracing::info!(sink_id = %id, %kind, "Carbon sink deleted");

        Ok(deleted)
    }
}
