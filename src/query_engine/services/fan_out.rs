use crate::shared::error::QueryError;
use crate::shared::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

/// Runs independent sub-requests concurrently and waits for all of them
///
/// At most `width` requests are in flight. Results are collected in
/// completion order. The first failure ends the step: requests still in
/// flight are dropped and nothing collected so far is returned.
///
/// # Arguments
/// * `step` - Human readable name of the step, used in the error
/// * `inputs` - One input per sub-request
/// * `width` - Maximum number of concurrent sub-requests (0 is treated as 1)
/// * `task` - Builds the sub-request for one input
///
/// # Errors
/// Returns the failing sub-request's error wrapped in [`QueryError::FanOutFailure`]
pub async fn fan_out<I, T, F, Fut>(step: &str, inputs: I, width: usize, task: F) -> Result<Vec<T>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    stream::iter(inputs)
        .map(task)
        .buffer_unordered(width.max(1))
        .try_collect()
        .await
        .map_err(|err: anyhow::Error| {
            anyhow::Error::new(QueryError::FanOutFailure {
                step: step.to_string(),
                source: err.into(),
            })
        })
}
