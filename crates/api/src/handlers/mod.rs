pub mod auth;
pub mod blog;
pub mod feed;
pub mod gallery;
pub mod lead;
pub mod review;
pub mod route;
pub mod settings;
pub mod upload;
pub mod vehicle;
