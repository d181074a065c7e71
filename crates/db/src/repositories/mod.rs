//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blog_post_repo;
pub mod gallery_photo_repo;
pub mod gallery_repo;
pub mod lead_repo;
pub mod review_repo;
pub mod route_repo;
pub mod settings_repo;
pub mod vehicle_repo;

pub use blog_post_repo::BlogPostRepo;
pub use gallery_photo_repo::GalleryPhotoRepo;
pub use gallery_repo::GalleryRepo;
pub use lead_repo::{ApplicationRequestRepo, TransferRequestRepo};
pub use review_repo::ReviewRepo;
pub use route_repo::RouteRepo;
pub use settings_repo::{BenefitStatsRepo, HomeSettingsRepo, SiteSettingsRepo, TransferConfigRepo};
pub use vehicle_repo::VehicleRepo;
