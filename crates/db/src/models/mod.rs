pub mod blog_post;
pub mod feed;
pub mod gallery;
pub mod lead;
pub mod review;
pub mod route;
pub mod settings;
pub mod vehicle;
