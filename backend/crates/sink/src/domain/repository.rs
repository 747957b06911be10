//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::SinkId;
use kernel::time_window::TimeWindow;

use crate::domain::entities::{CarbonSink, SinkKind};
use crate::domain::land::LandCalculation;
use crate::error::SinkResult;

/// Carbon sink ledger
#[trait_variant::make(SinkRepository: Send)]
pub trait LocalSinkRepository {
    async fn insert(&self, sink: &CarbonSink) -> SinkResult<()>;

    /// Sinks of one kind created inside `window`, oldest first
    async fn find_in_window(
        &self,
        kind: SinkKind,
        window: &TimeWindow,
    ) -> SinkResult<Vec<CarbonSink>>;

    /// Delete a sink of `kind`; with `within` set, only if it was created inside it
    async fn delete(
        &self,
        kind: SinkKind,
        id: SinkId,
        within: Option<&TimeWindow>,
    ) -> SinkResult<Option<CarbonSink>>;

    async fn record_land_calculation(&self, calculation: &LandCalculation) -> SinkResult<()>;
}
