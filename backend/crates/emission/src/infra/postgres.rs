//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::EmissionRecordId;
use kernel::time_window::TimeWindow;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::{EmissionCategory, EmissionPayload, EmissionRecord};
use crate::domain::repository::EmissionRecordRepository;
use crate::error::{EmissionError, EmissionResult};

/// PostgreSQL-backed record store
#[derive(Clone)]
pub struct PgEmissionRepository {
    pool: PgPool,
}

impl PgEmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl EmissionRecordRepository for PgEmissionRepository {
    async fn insert(&self, record: &EmissionRecord) -> EmissionResult<()> {
        let payload = record
            .payload
            .as_ref()
            .ok_or_else(|| EmissionError::Internal("record without payload".to_string()))?
            .to_json()
            .map_err(|e| EmissionError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO emission_records (
                emission_record_id,
                category,
                payload,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.into_uuid())
        .bind(record.category.as_str())
        .bind(Json(payload))
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(record_id = %record.id, category = %record.category, "Emission record stored");

        Ok(())
    }

    async fn find_in_window(
        &self,
        category: EmissionCategory,
        window: &TimeWindow,
    ) -> EmissionResult<Vec<EmissionRecord>> {
        let rows = sqlx::query_as::<_, EmissionRecordRow>(
            r#"
            SELECT emission_record_id, category, payload, created_at
            FROM emission_records
            WHERE category = $1 AND created_at >= $2 AND created_at <= $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(category.as_str())
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(EmissionRecordRow::into_record)
            .collect())
    }

    async fn delete_created_within(
        &self,
        id: EmissionRecordId,
        window: &TimeWindow,
    ) -> EmissionResult<Option<EmissionRecord>> {
        let row = sqlx::query_as::<_, EmissionRecordRow>(
            r#"
            DELETE FROM emission_records
            WHERE emission_record_id = $1 AND created_at >= $2 AND created_at <= $3
            RETURNING emission_record_id, category, payload, created_at
            "#,
        )
        .bind(id.into_uuid())
        .bind(window.start())
        .bind(window.end())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(EmissionRecordRow::into_record))
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct EmissionRecordRow {
    emission_record_id: Uuid,
    category: String,
    payload: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl EmissionRecordRow {
    /// Rows with an unknown category are skipped; an undecodable payload
    /// keeps the record with no contribution.
    fn into_record(self) -> Option<EmissionRecord> {
        let Some(category) = EmissionCategory::from_tag(&self.category) else {
            tracing::warn!(
                record_id = %self.emission_record_id,
                category = %self.category,
                "Skipping emission record with unknown category"
            );
            return None;
        };

        let payload = match EmissionPayload::from_json(category, self.payload.0) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!(
                    record_id = %self.emission_record_id,
                    %category,
                    error = %e,
                    "Stored emission payload does not decode"
                );
                None
            }
        };

        Some(EmissionRecord {
            id: EmissionRecordId::from_uuid(self.emission_record_id),
            category,
            created_at: self.created_at,
            payload,
        })
    }
}
