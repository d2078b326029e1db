use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when writing or reading audit records
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// Kind of advisor run being audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "analysis_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    Recommendation,
    Health,
}

/// One audit row to be written
#[derive(Debug, Clone)]
pub struct NewAnalysisRecord {
    pub request_id: Uuid,
    pub pet_name: String,
    pub analysis_type: AnalysisType,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
    pub confidence: f64,
    pub provider: String,
    pub execution_ms: i64,
}

/// Persisted audit record returned from history queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "requestId")]
    pub request_id: Uuid,
    #[serde(rename = "petName")]
    pub pet_name: String,
    #[serde(rename = "analysisType")]
    pub analysis_type: AnalysisType,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
    pub confidence: f64,
    pub provider: String,
    #[serde(rename = "executionMs")]
    pub execution_ms: i64,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Aggregate statistics over a pet's audit history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub pet_name: String,
    pub total_runs: i64,
    pub recommendations: i64,
    pub health_checks: i64,
    pub avg_confidence: Option<f64>,
    pub last_run_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// PostgreSQL store for advisor audit records
///
/// Write-only from the recommendation path: a failed insert is logged by the
/// caller and never fails the recommendation itself.
pub struct AuditStore {
    pool: PgPool,
}

impl AuditStore {
    /// Create a new audit store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AuditError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new audit store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, AuditError> {
        tracing::info!("Connecting to PostgreSQL audit store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Persist one analysis run
    pub async fn record(&self, record: NewAnalysisRecord) -> Result<(), AuditError> {
        let query = r#"
            INSERT INTO analysis_records
                (request_id, pet_name, analysis_type, input, output, confidence, provider, execution_ms)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(query)
            .bind(record.request_id)
            .bind(&record.pet_name)
            .bind(record.analysis_type)
            .bind(&record.input)
            .bind(&record.output)
            .bind(record.confidence)
            .bind(&record.provider)
            .bind(record.execution_ms)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded {:?} analysis for {} ({})",
            record.analysis_type,
            record.pet_name,
            record.request_id
        );

        Ok(())
    }

    /// Recent audit records for a pet, newest first
    pub async fn history(
        &self,
        pet_name: &str,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, AuditError> {
        let query = r#"
            SELECT request_id, pet_name, analysis_type, input, output,
                   confidence, provider, execution_ms, created_at
            FROM analysis_records
            WHERE pet_name = $1
            ORDER BY created_at DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(pet_name)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| AnalysisRecord {
                request_id: row.get("request_id"),
                pet_name: row.get("pet_name"),
                analysis_type: row.get("analysis_type"),
                input: row.get("input"),
                output: row.get("output"),
                confidence: row.get("confidence"),
                provider: row.get("provider"),
                execution_ms: row.get("execution_ms"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(records)
    }

    /// Aggregate statistics for a pet's history
    pub async fn stats(&self, pet_name: &str) -> Result<AnalysisStats, AuditError> {
        let query = r#"
            SELECT
                COUNT(*) as total_runs,
                COUNT(*) FILTER (WHERE analysis_type = 'recommendation') as recommendations,
                COUNT(*) FILTER (WHERE analysis_type = 'health') as health_checks,
                AVG(confidence) as avg_confidence,
                MAX(created_at) as last_run_at
            FROM analysis_records
            WHERE pet_name = $1
        "#;

        let row = sqlx::query(query)
            .bind(pet_name)
            .fetch_one(&self.pool)
            .await?;

        Ok(AnalysisStats {
            pet_name: pet_name.to_string(),
            total_runs: row.get("total_runs"),
            recommendations: row.get("recommendations"),
            health_checks: row.get("health_checks"),
            avg_confidence: row.get("avg_confidence"),
            last_run_at: row.get("last_run_at"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, AuditError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
