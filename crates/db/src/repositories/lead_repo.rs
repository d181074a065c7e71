//! Repositories for the `application_requests` and `transfer_requests`
//! tables.

use sqlx::PgPool;
use transfer_core::leads::LEAD_STATUS_NEW;
use transfer_core::types::DbId;

use crate::models::lead::{
    ApplicationRequest, CreateApplicationRequest, CreateTransferRequest, TransferRequest,
};

// ---------------------------------------------------------------------------
// Application requests
// ---------------------------------------------------------------------------

const APPLICATION_COLUMNS: &str =
    "id, name, phone, contact_method, message, status, created_at, updated_at";

/// Provides CRUD operations for callback applications.
pub struct ApplicationRequestRepo;

impl ApplicationRequestRepo {
    /// Insert a new lead with status `new`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplicationRequest,
    ) -> Result<ApplicationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO application_requests (name, phone, contact_method, message, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationRequest>(&query)
            .bind(input.name.trim())
            .bind(input.phone.trim())
            .bind(&input.contact_method)
            .bind(&input.message)
            .bind(LEAD_STATUS_NEW)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApplicationRequest>, sqlx::Error> {
        let query = format!("SELECT {APPLICATION_COLUMNS} FROM application_requests WHERE id = $1");
        sqlx::query_as::<_, ApplicationRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leads newest first, optionally by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ApplicationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {APPLICATION_COLUMNS} FROM application_requests
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ApplicationRequest>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)::BIGINT FROM application_requests
             WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Set the workflow status. Returns `None` if the lead does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<ApplicationRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE application_requests SET status = $2
             WHERE id = $1
             RETURNING {APPLICATION_COLUMNS}"
        );
        sqlx::query_as::<_, ApplicationRequest>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lead by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM application_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Transfer requests
// ---------------------------------------------------------------------------

const TRANSFER_COLUMNS: &str = "id, customer_name, customer_phone, contact_method, from_location, \
                                to_location, date, return_date, passengers, vehicle_id, comment, \
                                status, created_at, updated_at";

/// Provides CRUD operations for transfer booking requests.
pub struct TransferRequestRepo;

impl TransferRequestRepo {
    /// Insert a new booking request with status `new`. The caller has
    /// already checked the dates and the referenced vehicle.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransferRequest,
    ) -> Result<TransferRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO transfer_requests (customer_name, customer_phone, contact_method,
                                            from_location, to_location, date, return_date,
                                            passengers, vehicle_id, comment, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {TRANSFER_COLUMNS}"
        );
        sqlx::query_as::<_, TransferRequest>(&query)
            .bind(input.customer_name.trim())
            .bind(input.customer_phone.trim())
            .bind(&input.contact_method)
            .bind(&input.from_location)
            .bind(&input.to_location)
            .bind(input.date)
            .bind(input.return_date)
            .bind(input.passengers)
            .bind(input.vehicle_id)
            .bind(&input.comment)
            .bind(LEAD_STATUS_NEW)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TransferRequest>, sqlx::Error> {
        let query = format!("SELECT {TRANSFER_COLUMNS} FROM transfer_requests WHERE id = $1");
        sqlx::query_as::<_, TransferRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List booking requests newest first, optionally by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TransferRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSFER_COLUMNS} FROM transfer_requests
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TransferRequest>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)::BIGINT FROM transfer_requests
             WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Set the workflow status. Returns `None` if the request does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<TransferRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE transfer_requests SET status = $2
             WHERE id = $1
             RETURNING {TRANSFER_COLUMNS}"
        );
        sqlx::query_as::<_, TransferRequest>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a booking request by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transfer_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
