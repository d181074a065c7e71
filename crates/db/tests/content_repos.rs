//! Integration tests for the content repositories: blog publishing,
//! gallery/photo ordering and cascade, review moderation.

use assert_matches::assert_matches;
use sqlx::PgPool;
use transfer_core::publishing::{ReviewFilter, ReviewFlags};
use transfer_db::models::blog_post::{CreateBlogPost, UpdateBlogPost};
use transfer_db::models::gallery::{CreateGallery, CreateGalleryPhoto};
use transfer_db::models::review::{CreateReview, UpdateReview};
use transfer_db::repositories::{BlogPostRepo, GalleryPhotoRepo, GalleryRepo, ReviewRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_post(title: &str) -> CreateBlogPost {
    CreateBlogPost {
        title: title.to_string(),
        content: "Body text".to_string(),
        ..Default::default()
    }
}

fn new_gallery(title: &str) -> CreateGallery {
    CreateGallery {
        title: title.to_string(),
        ..Default::default()
    }
}

fn new_photo(url: &str) -> CreateGalleryPhoto {
    CreateGalleryPhoto {
        url: url.to_string(),
        ..Default::default()
    }
}

fn new_review(rating: i32) -> CreateReview {
    CreateReview {
        customer_name: "Anna".to_string(),
        rating: Some(rating),
        comment: "Great driver".to_string(),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Blog posts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_post_has_no_publish_timestamp(pool: PgPool) {
    let post = BlogPostRepo::create(&pool, &new_post("Draft"), "draft", "")
        .await
        .unwrap();
    assert!(!post.is_published);
    assert!(post.published_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn republish_keeps_first_publish_timestamp(pool: PgPool) {
    let post = BlogPostRepo::create(&pool, &new_post("Post"), "post", "")
        .await
        .unwrap();

    let published = BlogPostRepo::set_published(&pool, post.id, true)
        .await
        .unwrap()
        .unwrap();
    let first = published.published_at.expect("stamped on first publish");

    let hidden = BlogPostRepo::set_published(&pool, post.id, false)
        .await
        .unwrap()
        .unwrap();
    assert!(!hidden.is_published);
    assert_eq!(hidden.published_at, Some(first));

    let again = BlogPostRepo::set_published(&pool, post.id, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.published_at, Some(first));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn publishing_through_update_stamps_once(pool: PgPool) {
    let post = BlogPostRepo::create(&pool, &new_post("Post"), "post", "")
        .await
        .unwrap();
    let update = UpdateBlogPost {
        is_published: Some(true),
        ..Default::default()
    };
    let updated = BlogPostRepo::update(&pool, post.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.published_at.is_some());

    let retitled = BlogPostRepo::update(
        &pool,
        post.id,
        &UpdateBlogPost {
            title: Some("New title".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(retitled.published_at, updated.published_at);
    assert_eq!(retitled.title, "New title");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_slug_violates_unique_constraint(pool: PgPool) {
    BlogPostRepo::create(&pool, &new_post("One"), "same-slug", "")
        .await
        .unwrap();
    let err = BlogPostRepo::create(&pool, &new_post("Two"), "same-slug", "")
        .await
        .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_blog_posts_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slug_exists_excludes_self(pool: PgPool) {
    let post = BlogPostRepo::create(&pool, &new_post("One"), "taken", "")
        .await
        .unwrap();
    assert!(BlogPostRepo::slug_exists(&pool, "taken", None).await.unwrap());
    assert!(!BlogPostRepo::slug_exists(&pool, "taken", Some(post.id))
        .await
        .unwrap());
    assert!(!BlogPostRepo::slug_exists(&pool, "free", None).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slug_lookup_hides_drafts_from_public(pool: PgPool) {
    BlogPostRepo::create(&pool, &new_post("Draft"), "draft-post", "")
        .await
        .unwrap();
    assert!(BlogPostRepo::find_by_slug(&pool, "draft-post", true)
        .await
        .unwrap()
        .is_none());
    assert!(BlogPostRepo::find_by_slug(&pool, "draft-post", false)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Galleries and photos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_gallery_removes_its_photos(pool: PgPool) {
    let gallery = GalleryRepo::create(&pool, &new_gallery("Trip"), "trip")
        .await
        .unwrap();
    GalleryPhotoRepo::create(&pool, gallery.id, &new_photo("https://x.test/1.jpg"))
        .await
        .unwrap();
    GalleryPhotoRepo::create(&pool, gallery.id, &new_photo("https://x.test/2.jpg"))
        .await
        .unwrap();

    assert!(GalleryRepo::delete(&pool, gallery.id).await.unwrap());

    let orphans: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM gallery_photos WHERE gallery_id = $1")
        .bind(gallery.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans.0, 0);
    assert!(GalleryRepo::find_by_id(&pool, gallery.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn photos_append_and_renumber_after_delete(pool: PgPool) {
    let gallery = GalleryRepo::create(&pool, &new_gallery("Trip"), "trip")
        .await
        .unwrap();
    let urls: Vec<String> = (1..=4).map(|i| format!("https://x.test/{i}.jpg")).collect();
    let created = GalleryPhotoRepo::create_batch(&pool, gallery.id, &urls)
        .await
        .unwrap();
    assert_eq!(
        created.iter().map(|p| p.sort_order).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );

    let deleted = GalleryPhotoRepo::delete_and_renumber(&pool, created[1].id)
        .await
        .unwrap();
    assert_matches!(deleted, Some(ref p) if p.id == created[1].id);

    let remaining = GalleryPhotoRepo::list_for_gallery(&pool, gallery.id)
        .await
        .unwrap();
    assert_eq!(
        remaining.iter().map(|p| p.sort_order).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(remaining[1].id, created[2].id);

    assert!(GalleryPhotoRepo::delete_and_renumber(&pool, created[1].id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_assigns_positions(pool: PgPool) {
    let gallery = GalleryRepo::create(&pool, &new_gallery("Trip"), "trip")
        .await
        .unwrap();
    let urls: Vec<String> = (1..=3).map(|i| format!("https://x.test/{i}.jpg")).collect();
    let created = GalleryPhotoRepo::create_batch(&pool, gallery.id, &urls)
        .await
        .unwrap();

    let order = vec![created[2].id, created[0].id, created[1].id];
    let photos = GalleryPhotoRepo::reorder(&pool, gallery.id, &order)
        .await
        .unwrap()
        .expect("ids match the gallery");
    assert_eq!(photos.iter().map(|p| p.id).collect::<Vec<_>>(), order);
    assert_eq!(
        GalleryPhotoRepo::ids_for_gallery(&pool, gallery.id).await.unwrap(),
        order
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_with_stale_ids_writes_nothing(pool: PgPool) {
    let gallery = GalleryRepo::create(&pool, &new_gallery("Trip"), "trip")
        .await
        .unwrap();
    let urls: Vec<String> = (1..=3).map(|i| format!("https://x.test/{i}.jpg")).collect();
    let created = GalleryPhotoRepo::create_batch(&pool, gallery.id, &urls)
        .await
        .unwrap();
    let listed: Vec<_> = created.iter().map(|p| p.id).collect();

    // A photo lands after the client fetched the gallery.
    let late = GalleryPhotoRepo::create(&pool, gallery.id, &new_photo("https://x.test/late.jpg"))
        .await
        .unwrap();

    let reversed: Vec<_> = listed.iter().rev().copied().collect();
    assert!(GalleryPhotoRepo::reorder(&pool, gallery.id, &reversed)
        .await
        .unwrap()
        .is_none());

    let mut expected = listed.clone();
    expected.push(late.id);
    assert_eq!(
        GalleryPhotoRepo::ids_for_gallery(&pool, gallery.id).await.unwrap(),
        expected
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_racing_an_insert_never_strands_a_photo(pool: PgPool) {
    let gallery = GalleryRepo::create(&pool, &new_gallery("Trip"), "trip")
        .await
        .unwrap();
    let urls: Vec<String> = (1..=3).map(|i| format!("https://x.test/{i}.jpg")).collect();
    let created = GalleryPhotoRepo::create_batch(&pool, gallery.id, &urls)
        .await
        .unwrap();
    let reversed: Vec<_> = created.iter().rev().map(|p| p.id).collect();

    let late = new_photo("https://x.test/late.jpg");
    let (reordered, inserted) = tokio::join!(
        GalleryPhotoRepo::reorder(&pool, gallery.id, &reversed),
        GalleryPhotoRepo::create(&pool, gallery.id, &late),
    );
    let inserted = inserted.unwrap();

    let photos = GalleryPhotoRepo::list_for_gallery(&pool, gallery.id)
        .await
        .unwrap();
    assert_eq!(photos.len(), 4);
    match reordered.unwrap() {
        // Reorder committed first; the insert was appended after it.
        Some(_) => {
            let ids: Vec<_> = photos.iter().map(|p| p.id).collect();
            let mut expected = reversed.clone();
            expected.push(inserted.id);
            assert_eq!(ids, expected);
        }
        // The insert won the lock, so the three-id list was rejected.
        None => assert_eq!(photos[3].id, inserted.id),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gallery_list_includes_count_and_cover(pool: PgPool) {
    let gallery = GalleryRepo::create(&pool, &new_gallery("Trip"), "trip")
        .await
        .unwrap();
    GalleryPhotoRepo::create_batch(
        &pool,
        gallery.id,
        &["https://x.test/a.jpg".to_string(), "https://x.test/b.jpg".to_string()],
    )
    .await
    .unwrap();

    let list = GalleryRepo::list(&pool, None, 10, 0).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].photo_count, 2);
    assert_eq!(list[0].cover_url.as_deref(), Some("https://x.test/a.jpg"));

    assert!(GalleryRepo::list(&pool, Some(true), 10, 0).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_sets_both_flags(pool: PgPool) {
    let review = ReviewRepo::create(&pool, &new_review(5), ReviewFlags::PENDING)
        .await
        .unwrap();
    assert!(!review.is_approved && !review.is_published);
    assert!(review.moderated_at.is_none());

    let approved = ReviewRepo::moderate(&pool, review.id, ReviewFlags::APPROVED)
        .await
        .unwrap()
        .unwrap();
    assert!(approved.is_approved && approved.is_published);
    assert!(approved.moderated_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_and_pending_are_distinguished(pool: PgPool) {
    let pending = ReviewRepo::create(&pool, &new_review(4), ReviewFlags::PENDING)
        .await
        .unwrap();
    let rejected = ReviewRepo::create(&pool, &new_review(2), ReviewFlags::PENDING)
        .await
        .unwrap();
    ReviewRepo::moderate(&pool, rejected.id, ReviewFlags::REJECTED)
        .await
        .unwrap();

    let pending_ids: Vec<_> = ReviewRepo::list(&pool, Some(ReviewFilter::Pending), 10, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(pending_ids, vec![pending.id]);

    let rejected_ids: Vec<_> = ReviewRepo::list(&pool, Some(ReviewFilter::Rejected), 10, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(rejected_ids, vec![rejected.id]);
    assert_eq!(ReviewRepo::count(&pool, None).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn published_unapproved_review_is_rejected_by_schema(pool: PgPool) {
    let review = ReviewRepo::create(&pool, &new_review(5), ReviewFlags::PENDING)
        .await
        .unwrap();
    let inconsistent = ReviewFlags {
        is_approved: false,
        is_published: true,
    };
    let err = ReviewRepo::update(&pool, review.id, &UpdateReview::default(), inconsistent)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23514"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_cover_published_reviews_only(pool: PgPool) {
    for rating in [5, 3] {
        let review = ReviewRepo::create(&pool, &new_review(rating), ReviewFlags::PENDING)
            .await
            .unwrap();
        ReviewRepo::moderate(&pool, review.id, ReviewFlags::APPROVED)
            .await
            .unwrap();
    }
    ReviewRepo::create(&pool, &new_review(1), ReviewFlags::PENDING)
        .await
        .unwrap();

    let stats = ReviewRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.average_rating, Some(4.0));
}
