// Library for tests to access modules

pub mod accessor;
pub mod config;
pub mod error;
pub mod export;
pub mod feed;
pub mod models;
pub mod monitor;
pub mod pipeline;
pub mod reading_repo;
pub mod routes;
pub mod version;
