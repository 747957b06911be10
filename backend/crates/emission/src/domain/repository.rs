//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::EmissionRecordId;
use kernel::time_window::TimeWindow;

use crate::domain::entities::{EmissionCategory, EmissionRecord};
use crate::error::EmissionResult;

/// Emission record store
#[trait_variant::make(EmissionRecordRepository: Send)]
pub trait LocalEmissionRecordRepository {
    /// Persist a new record
    async fn insert(&self, record: &EmissionRecord) -> EmissionResult<()>;

    /// Records of one category created inside `window`, oldest first
    async fn find_in_window(
        &self,
        category: EmissionCategory,
        window: &TimeWindow,
    ) -> EmissionResult<Vec<EmissionRecord>>;

    /// Delete `id` only if it was created inside `window`; returns the deleted record
    async fn delete_created_within(
        &self,
        id: EmissionRecordId,
        window: &TimeWindow,
    ) -> EmissionResult<Option<EmissionRecord>>;
}
