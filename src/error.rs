// Error taxonomy shared by the resolver and the executor.
//
// Every failure is returned up to `cli::run`, which is the only place that
// turns an `Error` into a message on stderr and a process exit code.

use std::io;

/// Errors produced while resolving or executing a transcode.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed command line. Detected before any endpoint is touched.
    #[error("{0}")]
    Usage(String),

    /// Endpoint open/read/write failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The input is not a valid zlib container, or its payload is corrupt.
    #[error("{context}: {detail}")]
    Format {
        context: &'static str,
        detail: String,
    },

    /// A finalize or release step failed after the copy.
    #[error("{context}: {source}")]
    Close {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn format(context: &'static str, detail: impl ToString) -> Self {
        Self::Format {
            context,
            detail: detail.to_string(),
        }
    }

    /// Process exit code for this error: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Io { .. } | Self::Format { .. } | Self::Close { .. } => 1,
        }
    }

    /// Whether this error was raised by the container layer.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
