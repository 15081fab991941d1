use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong in this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid grid dimensions {width}x{height}")]
    Construction { width: usize, height: usize },

    #[error("malformed template: {0}")]
    Format(#[from] FormatError),

    #[error("cell ({x},{y}) is out of bounds for a {width}x{height} grid")]
    Bounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Ways a template file can fail to parse. The encoding itself is
/// documented on [`crate::template`].
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("missing or unparseable dimension header {found:?}")]
    Header { found: String },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} is {found} cells wide, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell character {found:?} at row {row}, column {col}")]
    BadDigit { row: usize, col: usize, found: char },
}
