//! Window Collection
//!
//! Reads all seven sources of a window concurrently. Each read has its own
//! deadline; a failed read is logged and listed instead of failing the
//! whole collection.

use std::future::Future;
use std::time::Duration;

use emission::{CategoryRecords, EmissionCategory};
use kernel::time_window::TimeWindow;

use crate::domain::source::{DataSource, ReportSource, WindowData};
use crate::error::{ReportError, ReportResult};

async fn bounded<T>(
    source: DataSource,
    limit: Duration,
    read: impl Future<Output = ReportResult<Vec<T>>>,
) -> Result<Vec<T>, DataSource> {
    match tokio::time::timeout(limit, read).await {
        Ok(Ok(items)) => Ok(items),
        Ok(Err(e)) => {
            tracing::warn!(%source, error = %e, "Report source failed");
            Err(source)
        }
        Err(_) => {
            tracing::warn!(%source, timeout_ms = limit.as_millis() as u64, "Report source timed out");
            Err(source)
        }
    }
}

fn keep<T>(failed: &mut Vec<DataSource>, result: Result<Vec<T>, DataSource>) -> Vec<T> {
    result.unwrap_or_else(|source| {
        failed.push(source);
        Vec::new()
    })
}

/// Load every source for `window`; fails only when all of them fail
pub async fn collect_window<S>(
    source: &S,
    window: &TimeWindow,
    limit: Duration,
) -> ReportResult<WindowData>
where
    S: ReportSource + Sync,
{
    let emissions = move |category| {
        bounded(
            DataSource::Emissions(category),
            limit,
            source.emission_records(category, window),
        )
    };

    let (electricity, fuel_combustion, shipping, explosion, coal_burn, methane, sinks) = tokio::join!(
        emissions(EmissionCategory::Electricity),
        emissions(EmissionCategory::FuelCombustion),
        emissions(EmissionCategory::Shipping),
        emissions(EmissionCategory::Explosion),
        emissions(EmissionCategory::CoalBurn),
        emissions(EmissionCategory::Methane),
        bounded(DataSource::ExistingSinks, limit, source.existing_sinks(window)),
    );

    let mut failed = Vec::new();
    let data = WindowData {
        records: CategoryRecords {
            electricity: keep(&mut failed, electricity),
            fuel_combustion: keep(&mut failed, fuel_combustion),
            shipping: keep(&mut failed, shipping),
            explosion: keep(&mut failed, explosion),
            coal_burn: keep(&mut failed, coal_burn),
            methane: keep(&mut failed, methane),
        },
        sinks: keep(&mut failed, sinks),
        failed_sources: failed,
    };

    if data.failed_sources.len() == DataSource::ALL.len() {
        return Err(ReportError::AllSourcesFailed);
    }

    tracing::debug!(
        %window,
        records = data.records.total_len(),
        sinks = data.sinks.len(),
        failed = data.failed_sources.len(),
        "Report window collected"
    );

    Ok(data)
}
