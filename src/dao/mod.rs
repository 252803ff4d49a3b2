/// Shared persistence models.
pub mod models;
/// Company profile access.
pub mod profile_store;
/// Storage abstraction layer for profile operations.
pub mod storage;
