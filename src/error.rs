use thiserror::Error;

/// Errors returned by the deques and trackers in this crate.
///
/// All of them are caller contract violations; nothing here does I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("deque is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("container is empty")]
    EmptyContainer,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
