// Error type shared by the index-map layer and the collaborator entry points.
//
// The alignment core itself is infallible; these variants cover malformed
// caller input around it (index maps, offsets, size limits) and file I/O.

use thiserror::Error;

/// Result alias for fallible `oxidiff` operations.
pub type Result<T> = std::result::Result<T, DiffError>;

#[derive(Error, Debug)]
pub enum DiffError {
    /// An index map does not have one entry per sequence element.
    #[error("{side} index map has {actual} entries, sequence has {expected}")]
    IndexMapLength {
        side: Side,
        expected: usize,
        actual: usize,
    },

    /// A mapped index does not fit the result vector it targets.
    #[error("{side} index {index} does not fit a result vector of length {len}")]
    IndexOutOfRange { side: Side, index: usize, len: usize },

    /// A starting offset lies past the end of its buffer.
    #[error("offset {offset} is past the end of a {len}-byte buffer")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// A source offset was given where only byte mode accepts one.
    #[error("source offset {offset} is only supported in byte mode")]
    OffsetNotSupported { offset: usize },

    /// Combined input length exceeds the configured limit.
    #[error("inputs total {total} elements, limit is {limit}")]
    InputTooLarge { total: usize, limit: usize },

    /// Line mode was asked to diff data that is not UTF-8.
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which of the two compared sequences an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_side() {
        let err = DiffError::IndexMapLength {
            side: Side::Target,
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "target index map has 3 entries, sequence has 4"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DiffError = io.into();
        assert!(matches!(err, DiffError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn line_mode_offset_message() {
        let err = DiffError::OffsetNotSupported { offset: 8 };
        assert_eq!(
            err.to_string(),
            "source offset 8 is only supported in byte mode"
        );
    }
}
