use std::collections::TryReserveError;

use thiserror::Error;

/// Failure modes of the ordered collections.
///
/// `Empty` and `NotFound` are deliberately distinct: the first means the
/// structure holds nothing at all, the second that the structure is populated
/// but no entry satisfies the request.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("STRUCT_EMPTY")]
    Empty,
    #[error("NOT_FOUND")]
    NotFound,
    #[error("ALLOC_FAILURE")]
    AllocFailure,
}

impl From<TryReserveError> for TreeError {
    fn from(err: TryReserveError) -> Self {
        log::debug!("allocation failed: {err}");
        TreeError::AllocFailure
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_codes() {
        assert_eq!(TreeError::Empty.to_string(), "STRUCT_EMPTY");
        assert_eq!(TreeError::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(TreeError::AllocFailure.to_string(), "ALLOC_FAILURE");
    }

    #[test]
    fn reserve_failure_maps_to_alloc_failure() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(TreeError::from(err), TreeError::AllocFailure);
    }
}
