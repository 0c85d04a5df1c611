use crate::{AppError, Collection};

/// Render state of a fetch-on-mount listing.
///
/// Starts in `Loading` and leaves it exactly once. Failures collapse into
/// `Empty`; they are logged, never shown.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Loading,
    Populated(Vec<T>),
    Empty,
}

impl<T> FetchState<T> {
    /// Settle a listing from the result of its single read.
    pub fn resolve(collection: Collection, result: Result<Vec<T>, AppError>) -> Self {
        match result {
            Ok(rows) if rows.is_empty() => FetchState::Empty,
            Ok(rows) => FetchState::Populated(rows),
            Err(err) => {
                tracing::warn!(%collection, error = %err, "listing fetch failed; rendering empty state");
                FetchState::Empty
            }
        }
    }

    /// Same as [`resolve`](Self::resolve) for the raw server-function result.
    pub fn resolve_server<E: std::fmt::Display>(collection: Collection, result: Result<Vec<T>, E>) -> Self {
        Self::resolve(
            collection,
            result.map_err(|e| AppError::from_server_fn_message(&e.to_string())),
        )
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn rows(&self) -> &[T] {
        match self {
            FetchState::Populated(rows) => rows,
            _ => &[],
        }
    }
}
