//! Repository for the `gallery_photos` table.

use std::collections::HashSet;

use sqlx::{PgConnection, PgExecutor, PgPool};
use transfer_core::types::DbId;

use crate::models::gallery::{CreateGalleryPhoto, GalleryPhoto, UpdateGalleryPhoto};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, gallery_id, url, title, description, sort_order, created_at, updated_at";

/// Position after the current last photo of gallery `$1`.
const NEXT_ORDER: &str =
    "(SELECT COALESCE(MAX(sort_order) + 1, 0) FROM gallery_photos WHERE gallery_id = $1)";

/// Provides CRUD operations for the photos of a gallery.
pub struct GalleryPhotoRepo;

impl GalleryPhotoRepo {
    /// Photos of a gallery in display order.
    pub async fn list_for_gallery(
        pool: &PgPool,
        gallery_id: DbId,
    ) -> Result<Vec<GalleryPhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_photos
             WHERE gallery_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(gallery_id)
            .fetch_all(pool)
            .await
    }

    /// Insert one photo. Without an explicit order it is appended.
    pub async fn create(
        pool: &PgPool,
        gallery_id: DbId,
        input: &CreateGalleryPhoto,
    ) -> Result<GalleryPhoto, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_gallery(&mut tx, gallery_id).await?;

        let query = format!(
            "INSERT INTO gallery_photos (gallery_id, url, title, description, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, {NEXT_ORDER}))
             RETURNING {COLUMNS}"
        );
        let photo = sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(gallery_id)
            .bind(&input.url)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(photo)
    }

    /// Append already validated urls to a gallery within a transaction.
    ///
    /// The gallery row is locked so concurrent batches get disjoint order
    /// values. Returned photos follow the input order.
    pub async fn create_batch(
        pool: &PgPool,
        gallery_id: DbId,
        urls: &[String],
    ) -> Result<Vec<GalleryPhoto>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_gallery(&mut tx, gallery_id).await?;

        let query = format!(
            "INSERT INTO gallery_photos (gallery_id, url, sort_order)
             VALUES ($1, $2, {NEXT_ORDER})
             RETURNING {COLUMNS}"
        );
        let mut created = Vec::with_capacity(urls.len());
        for url in urls {
            let photo = sqlx::query_as::<_, GalleryPhoto>(&query)
                .bind(gallery_id)
                .bind(url)
                .fetch_one(&mut *tx)
                .await?;
            created.push(photo);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update a photo. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryPhoto,
    ) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery_photos SET
                url = COALESCE($2, url),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(id)
            .bind(&input.url)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.order)
            .fetch_optional(pool)
            .await
    }

    /// Ids of a gallery's photos in display order.
    pub async fn ids_for_gallery<'e>(
        executor: impl PgExecutor<'e>,
        gallery_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM gallery_photos WHERE gallery_id = $1 ORDER BY sort_order ASC, id ASC",
        )
        .bind(gallery_id)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Assign `sort_order = position` to each id in `photo_ids`, all in one
    /// transaction.
    ///
    /// `photo_ids` must list every photo of the gallery exactly once. The
    /// check runs under the gallery lock, so a photo added or deleted
    /// concurrently cannot slip past it. Returns `None` when the ids do not
    /// match the gallery's photos; nothing is written in that case.
    pub async fn reorder(
        pool: &PgPool,
        gallery_id: DbId,
        photo_ids: &[DbId],
    ) -> Result<Option<Vec<GalleryPhoto>>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_gallery(&mut tx, gallery_id).await?;

        let current = Self::ids_for_gallery(&mut *tx, gallery_id).await?;
        if !is_permutation(&current, photo_ids) {
            tx.rollback().await?;
            return Ok(None);
        }

        for (position, photo_id) in photo_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE gallery_photos SET sort_order = $3
                 WHERE id = $1 AND gallery_id = $2 AND sort_order <> $3",
            )
            .bind(photo_id)
            .bind(gallery_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "SELECT {COLUMNS} FROM gallery_photos
             WHERE gallery_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        let photos = sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(gallery_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(photos))
    }

    /// Delete a photo and close the gap it leaves: the remaining photos of
    /// the gallery are renumbered `0..n` in the same transaction, under the
    /// gallery lock.
    ///
    /// Returns the deleted row, or `None` if it did not exist.
    pub async fn delete_and_renumber(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GalleryPhoto>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owner: Option<(DbId,)> =
            sqlx::query_as("SELECT gallery_id FROM gallery_photos WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((gallery_id,)) = owner else {
            return Ok(None);
        };
        lock_gallery(&mut tx, gallery_id).await?;

        let query = format!("DELETE FROM gallery_photos WHERE id = $1 RETURNING {COLUMNS}");
        let Some(deleted) = sqlx::query_as::<_, GalleryPhoto>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query(
            "UPDATE gallery_photos p SET sort_order = r.position
             FROM (
                SELECT id, (ROW_NUMBER() OVER (ORDER BY sort_order, id) - 1)::INT AS position
                FROM gallery_photos WHERE gallery_id = $1
             ) r
             WHERE p.id = r.id AND p.sort_order <> r.position",
        )
        .bind(deleted.gallery_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(deleted))
    }
}

/// Serialize order-changing writes per gallery.
async fn lock_gallery(conn: &mut PgConnection, gallery_id: DbId) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT id FROM photo_galleries WHERE id = $1 FOR UPDATE")
        .bind(gallery_id)
        .fetch_optional(conn)
        .await?;
    Ok(())
}

/// True when `requested` holds exactly the ids in `current`, each once.
fn is_permutation(current: &[DbId], requested: &[DbId]) -> bool {
    if current.len() != requested.len() {
        return false;
    }
    let wanted: HashSet<DbId> = current.iter().copied().collect();
    let mut seen = HashSet::with_capacity(requested.len());
    requested
        .iter()
        .all(|id| wanted.contains(id) && seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_check() {
        assert!(is_permutation(&[1, 2, 3], &[3, 1, 2]));
        assert!(is_permutation(&[], &[]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 2]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 2, 2]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 2, 4]));
    }
}
