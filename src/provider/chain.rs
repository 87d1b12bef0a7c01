//! Ordered fallback of resolver steps.

use futures::future::BoxFuture;
use tracing::warn;

use crate::error::Result;

/// One resolution attempt. Steps are lazy: nothing runs until the chain
/// reaches them.
pub type Step<'a, T> = BoxFuture<'a, Option<T>>;

/// Run `steps` in order and return the first `Some`. Later steps never start
/// once an earlier one produced a value.
pub async fn first_some<'a, T>(steps: Vec<Step<'a, T>>) -> Option<T> {
    for step in steps {
        if let Some(value) = step.await {
            return Some(value);
        }
    }
    None
}

/// Collapse a catalog call into "no result from this tier", logging failures.
pub fn soften<T>(tier: &str, result: Result<Option<T>>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(tier, error = %e, "resolution tier failed, falling back");
            None
        }
    }
}
