mod config;
mod error;
mod models;
mod store;

pub use config::ProfileApiConfig;
pub use error::{ProfileDaoError, ProfileResult};
pub use store::HttpProfileStore;
