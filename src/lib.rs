pub mod draw;
pub mod error;
pub mod grid;
pub mod repl;
pub mod template;

pub use error::{Error, FormatError, Result};
pub use grid::{Cell, GenerationStats, Grid};
