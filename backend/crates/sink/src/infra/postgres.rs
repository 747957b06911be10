//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::SinkId;
use kernel::time_window::TimeWindow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{CarbonSink, SinkKind};
use crate::domain::land::LandCalculation;
use crate::domain::repository::SinkRepository;
use crate::error::SinkResult;

/// PostgreSQL-backed sink ledger
#[derive(Clone)]
pub struct PgSinkRepository {
    pool: PgPool,
}

impl PgSinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SinkRepository for PgSinkRepository {
    async fn insert(&self, sink: &CarbonSink) -> SinkResult<()> {
        sqlx::query(
            r#"
            INSERT INTO carbon_sinks (
                sink_id,
                sink_kind,
                name,
                vegetation_type,
                area_covered,
                carbon_sequestration_rate,
                daily_sequestration_rate,
                location,
                additional_details,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(sink.id.into_uuid())
        .bind(sink.kind.as_str())
        .bind(&sink.name)
        .bind(&sink.vegetation_type)
        .bind(sink.area_covered)
        .bind(sink.carbon_sequestration_rate)
        .bind(sink.daily_sequestration_rate)
        .bind(&sink.location)
        .bind(&sink.additional_details)
        .bind(sink.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_in_window(
        &self,
        kind: SinkKind,
        window: &TimeWindow,
    ) -> SinkResult<Vec<CarbonSink>> {
        let rows = sqlx::query_as::<_, SinkRow>(
            r#"
            SELECT sink_id, sink_kind, name, vegetation_type, area_covered,
                   carbon_sequestration_rate, daily_sequestration_rate,
                   location, additional_details, created_at
            FROM carbon_sinks
            WHERE sink_kind = $1 AND created_at >= $2 AND created_at <= $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(kind.as_str())
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(SinkRow::into_sink).collect())
    }

    async fn delete(
        &self,
        kind: SinkKind,
        id: SinkId,
        within: Option<&TimeWindow>,
    ) -> SinkResult<Option<CarbonSink>> {
        let row = match within {
            Some(window) => {
                sqlx::query_as::<_, SinkRow>(
                    r#"
                    DELETE FROM carbon_sinks
                    WHERE sink_id = $1 AND sink_kind = $2
                      AND created_at >= $3 AND created_at <= $4
                    RETURNING sink_id, sink_kind, name, vegetation_type, area_covered,
                              carbon_sequestration_rate, daily_sequestration_rate,
                              location, additional_details, created_at
                    "#,
                )
                .bind(id.into_uuid())
                .bind(kind.as_str())
                .bind(window.start())
                .bind(window.end())
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SinkRow>(
                    r#"
                    DELETE FROM carbon_sinks
                    WHERE sink_id = $1 AND sink_kind = $2
                    RETURNING sink_id, sink_kind, name, vegetation_type, area_covered,
                              carbon_sequestration_rate, daily_sequestration_rate,
                              location, additional_details, created_at
                    "#,
                )
                .bind(id.into_uuid())
                .bind(kind.as_str())
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(row.and_then(SinkRow::into_sink))
    }

    async fn record_land_calculation(&self, calculation: &LandCalculation) -> SinkResult<()> {
        let result = &calculation.result;
        sqlx::query(
            r#"
            INSERT INTO land_calculations (
                calculation_id,
                target_carbon_sequestration,
                land_type,
                forest_type,
                soil_suitability_factor,
                project_duration,
                required_land,
                sequestration_rate,
                total_carbon_sequestered,
                land_utilization_efficiency,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(calculation.id.into_uuid())
        .bind(calculation.target_carbon_sequestration)
        .bind(calculation.land_type.as_str())
        .bind(calculation.land_type.forest_type().map(|f| f.as_str()))
        .bind(calculation.soil_condition.suitability_factor())
        .bind(calculation.project_duration)
        .bind(result.required_land)
        .bind(result.sequestration_rate)
        .bind(result.total_carbon_sequestered)
        .bind(result.land_utilization_efficiency)
        .bind(calculation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct SinkRow {
    sink_id: Uuid,
    sink_kind: String,
    name: String,
    vegetation_type: Option<String>,
    area_covered: f64,
    carbon_sequestration_rate: f64,
    daily_sequestration_rate: Option<f64>,
    location: Option<String>,
    additional_details: Option<String>,
    created_at: DateTime<Utc>,
}

impl SinkRow {
    fn into_sink(self) -> Option<CarbonSink> {
        let Some(kind) = SinkKind::from_tag(&self.sink_kind) else {
            tracing::warn!(
                sink_id = %self.sink_id,
                sink_kind = %self.sink_kind,
                "Skipping carbon sink with unknown kind"
            );
            return None;
        };

        Some(CarbonSink {
            id: SinkId::from_uuid(self.sink_id),
            kind,
            name: self.name,
            vegetation_type: self.vegetation_type,
            area_covered: self.area_covered,
            carbon_sequestration_rate: self.carbon_sequestration_rate,
            daily_sequestration_rate: self.daily_sequestration_rate,
            location: self.location,
            additional_details: self.additional_details,
            created_at: self.created_at,
        })
    }
}
