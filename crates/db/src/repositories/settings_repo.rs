//! Repositories for the single-row settings tables.
//!
//! Reads go through `get_or_create_default`, which inserts the default row
//! when it is missing and then reads it back. Nothing is
//! cached in process; every call reads the current row.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::models::settings::{
    BenefitStats, HomeSettings, SiteSettings, TransferConfig, UpdateBenefitStats,
    UpdateHomeSettings, UpdateSiteSettings, UpdateTransferConfig, SETTINGS_ROW_ID,
};

/// Read the settings row in `table`, inserting the defaults first if it does
/// not exist yet.
///
/// The insert and the read are separate statements: a read in the same
/// statement would not see a row committed by a concurrent first insert.
async fn get_or_create<T>(pool: &PgPool, table: &str, columns: &str) -> Result<T, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut conn = pool.acquire().await?;
    ensure_row(&mut conn, table).await?;
    sqlx::query_as::<_, T>(&format!("SELECT {columns} FROM {table} WHERE id = $1"))
        .bind(SETTINGS_ROW_ID)
        .fetch_one(&mut *conn)
        .await
}

async fn ensure_row(conn: &mut PgConnection, table: &str) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        "INSERT INTO {table} (id) VALUES ($1) ON CONFLICT (id) DO NOTHING"
    ))
    .bind(SETTINGS_ROW_ID)
    .execute(conn)
    .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Site settings
// ---------------------------------------------------------------------------

const SITE_COLUMNS: &str = "site_name, phone, email, address, telegram_url, whatsapp_url, \
                            instagram_url, working_hours, meta_title, meta_description, updated_at";

pub struct SiteSettingsRepo;

impl SiteSettingsRepo {
    pub async fn get_or_create_default(pool: &PgPool) -> Result<SiteSettings, sqlx::Error> {
        get_or_create(pool, "site_settings", SITE_COLUMNS).await
    }

    /// Apply a partial update, creating the row first if needed.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateSiteSettings,
    ) -> Result<SiteSettings, sqlx::Error> {
        let mut tx = pool.begin().await?;
        ensure_row(&mut tx, "site_settings").await?;

        let query = format!(
            "UPDATE site_settings SET
                site_name = COALESCE($2, site_name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                address = COALESCE($5, address),
                telegram_url = COALESCE($6, telegram_url),
                whatsapp_url = COALESCE($7, whatsapp_url),
                instagram_url = COALESCE($8, instagram_url),
                working_hours = COALESCE($9, working_hours),
                meta_title = COALESCE($10, meta_title),
                meta_description = COALESCE($11, meta_description)
             WHERE id = $1
             RETURNING {SITE_COLUMNS}"
        );
        let settings = sqlx::query_as::<_, SiteSettings>(&query)
            .bind(SETTINGS_ROW_ID)
            .bind(&input.site_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.telegram_url)
            .bind(&input.whatsapp_url)
            .bind(&input.instagram_url)
            .bind(&input.working_hours)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Home page settings
// ---------------------------------------------------------------------------

const HOME_COLUMNS: &str =
    "hero_title, hero_subtitle, hero_image_url, about_title, about_text, cta_text, updated_at";

pub struct HomeSettingsRepo;

impl HomeSettingsRepo {
    pub async fn get_or_create_default(pool: &PgPool) -> Result<HomeSettings, sqlx::Error> {
        get_or_create(pool, "home_settings", HOME_COLUMNS).await
    }

    pub async fn update(
        pool: &PgPool,
        input: &UpdateHomeSettings,
    ) -> Result<HomeSettings, sqlx::Error> {
        let mut tx = pool.begin().await?;
        ensure_row(&mut tx, "home_settings").await?;

        let query = format!(
            "UPDATE home_settings SET
                hero_title = COALESCE($2, hero_title),
                hero_subtitle = COALESCE($3, hero_subtitle),
                hero_image_url = COALESCE($4, hero_image_url),
                about_title = COALESCE($5, about_title),
                about_text = COALESCE($6, about_text),
                cta_text = COALESCE($7, cta_text)
             WHERE id = $1
             RETURNING {HOME_COLUMNS}"
        );
        let settings = sqlx::query_as::<_, HomeSettings>(&query)
            .bind(SETTINGS_ROW_ID)
            .bind(&input.hero_title)
            .bind(&input.hero_subtitle)
            .bind(&input.hero_image_url)
            .bind(&input.about_title)
            .bind(&input.about_text)
            .bind(&input.cta_text)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(settings)
    }
}

// ---------------------------------------------------------------------------
// Transfer booking configuration
// ---------------------------------------------------------------------------

const TRANSFER_COLUMNS: &str = "currency, min_hours_before_trip, max_passengers, \
                                child_seat_price, night_surcharge_percent, booking_notice, updated_at";

pub struct TransferConfigRepo;

impl TransferConfigRepo {
    pub async fn get_or_create_default(pool: &PgPool) -> Result<TransferConfig, sqlx::Error> {
        get_or_create(pool, "transfer_config", TRANSFER_COLUMNS).await
    }

    /// Apply a partial update. `currency` is stored uppercase.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateTransferConfig,
    ) -> Result<TransferConfig, sqlx::Error> {
        let mut tx = pool.begin().await?;
        ensure_row(&mut tx, "transfer_config").await?;

        let query = format!(
            "UPDATE transfer_config SET
                currency = COALESCE($2, currency),
                min_hours_before_trip = COALESCE($3, min_hours_before_trip),
                max_passengers = COALESCE($4, max_passengers),
                child_seat_price = COALESCE($5, child_seat_price),
                night_surcharge_percent = COALESCE($6, night_surcharge_percent),
                booking_notice = COALESCE($7, booking_notice)
             WHERE id = $1
             RETURNING {TRANSFER_COLUMNS}"
        );
        let config = sqlx::query_as::<_, TransferConfig>(&query)
            .bind(SETTINGS_ROW_ID)
            .bind(input.currency.as_deref().map(str::to_uppercase))
            .bind(input.min_hours_before_trip)
            .bind(input.max_passengers)
            .bind(input.child_seat_price)
            .bind(input.night_surcharge_percent)
            .bind(&input.booking_notice)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Benefit counters
// ---------------------------------------------------------------------------

const BENEFIT_COLUMNS: &str =
    "years_experience, happy_clients, completed_transfers, cities_covered, updated_at";

pub struct BenefitStatsRepo;

impl BenefitStatsRepo {
    pub async fn get_or_create_default(pool: &PgPool) -> Result<BenefitStats, sqlx::Error> {
        get_or_create(pool, "benefit_stats", BENEFIT_COLUMNS).await
    }

    pub async fn update(
        pool: &PgPool,
        input: &UpdateBenefitStats,
    ) -> Result<BenefitStats, sqlx::Error> {
        let mut tx = pool.begin().await?;
        ensure_row(&mut tx, "benefit_stats").await?;

        let query = format!(
            "UPDATE benefit_stats SET
                years_experience = COALESCE($2, years_experience),
                happy_clients = COALESCE($3, happy_clients),
                completed_transfers = COALESCE($4, completed_transfers),
                cities_covered = COALESCE($5, cities_covered)
             WHERE id = $1
             RETURNING {BENEFIT_COLUMNS}"
        );
        let stats = sqlx::query_as::<_, BenefitStats>(&query)
            .bind(SETTINGS_ROW_ID)
            .bind(input.years_experience)
            .bind(input.happy_clients)
            .bind(input.completed_transfers)
            .bind(input.cities_covered)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(stats)
    }
}
