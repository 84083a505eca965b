/// Crate-wide Result alias with anyhow::Error as the error type.
///
/// Typed failures are raised as [`crate::shared::error::QueryError`] and
/// travel inside the anyhow error so that context can be attached on the way up.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
