use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for navtoc operations at the CLI and config seams
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for table of contents operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TocError {
    /// The heading source container is not configured or not in the document
    MissingSource(String),
    /// A level decrease tried to close lists beyond the root list
    StructureUnderflow {
        /// Heading that triggered the underflow
        heading_id: String,
        /// Level of that heading
        level: u8,
        /// Number of nested lists open when the heading was reached
        open_depth: usize,
    },
    /// The navigation target could not be resolved to an element
    TargetNotFound(String),
    /// The requested levels list is malformed
    InvalidLevels(String),
    /// Configuration error
    Config(String),
    /// IO error message
    Io(String),
}

impl fmt::Display for TocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TocError::MissingSource(src) => write!(f, "Heading source container not found: {}", src),
            TocError::StructureUnderflow { heading_id, level, open_depth } => write!(
                f,
                "Heading '{}' (level {}) closes more lists than are open ({} open)",
                heading_id, level, open_depth
            ),
            TocError::TargetNotFound(id) => write!(f, "Navigation target not found: {}", id),
            TocError::InvalidLevels(msg) => write!(f, "Invalid levels: {}", msg),
            TocError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TocError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl Error for TocError {}

impl From<io::Error> for TocError {
    fn from(err: io::Error) -> Self {
        TocError::Io(err.to_string())
    }
}
