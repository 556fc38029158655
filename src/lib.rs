// Library for tests to access modules

pub mod alerts;
pub mod config;
pub mod crosshost;
pub mod error;
pub mod models;
pub mod resolver;
pub mod retention;
pub mod routes;
pub mod stats;
pub mod store;
pub mod version;
