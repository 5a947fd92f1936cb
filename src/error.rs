use std::fmt;
use std::path::PathBuf;

/// Fatal error raised while loading the source tree
///
/// Any of these aborts the run before a single request file is written.
#[derive(Debug)]
pub enum ScanError {
    /// A source file could not be read
    Io {
        /// File that failed to read
        path: PathBuf,
        source: std::io::Error,
    },
    /// The directory walk itself failed (missing root, permission denied)
    Walk {
        /// Entry the walker was visiting
        path: PathBuf,
        message: String,
    },
    /// A source file is not syntactically valid Go
    Parse {
        /// File containing the syntax error
        path: PathBuf,
        /// 1-based line of the first error node
        line: usize,
        /// 1-based column of the first error node
        column: usize,
    },
    /// The Go grammar could not be loaded into the parser
    Grammar(String),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ScanError::Walk { path, message } => {
                write!(f, "failed to walk {}: {}", path.display(), message)
            }
            ScanError::Parse { path, line, column } => {
                write!(
                    f,
                    "syntax error in {} at {}:{}; refusing to generate from a malformed tree",
                    path.display(),
                    line,
                    column
                )
            }
            ScanError::Grammar(message) => write!(f, "failed to load Go grammar: {message}"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
