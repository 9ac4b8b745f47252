use shelf_core::{Capability, ShelfError};

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with
/// `crate::core::with_request_deadline`. On timeout, the inner helper returns
/// `ShelfError::RequestTimeout("request")` which call sites can remap to a
/// more specific capability label as needed.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, ShelfError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Collapse a set of provider errors into a uniform `ShelfError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<ShelfError>,
    not_found_what: Option<String>,
) -> ShelfError {
    if !attempted_any {
        return ShelfError::unsupported(capability.to_string());
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, ShelfError::ProviderTimeout { .. }))
    {
        return ShelfError::AllProvidersTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, ShelfError::NotFound { .. }))
    {
        return ShelfError::not_found(what);
    }
    ShelfError::AllProvidersFailed(errors)
}
