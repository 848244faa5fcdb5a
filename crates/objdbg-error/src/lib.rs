use thiserror::Error;

/// Primary error type for objdbg operations.
///
/// The parsing core reports every rejection as `InvalidArgument` with a
/// human-readable detail string; the remaining variants exist for the shell
/// driver around it. All failures are ordinary returned outcomes, never
/// fatal to the process.
#[derive(Error, Debug)]
pub enum ObjdbgError {
    /// Malformed input: bad quoting, reserved characters, oversized input,
    /// unknown flags, malformed path segments, out-of-order segments.
    #[error("invalid argument: {detail}")]
    InvalidArgument { detail: String },

    /// The shell was given a command word it does not know.
    #[error("unknown command: {name}")]
    UnknownCommand { name: String },

    /// File I/O error (command-file mode only; the parsing core does no I/O).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ObjdbgError {
    /// Create an `InvalidArgument` error.
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            detail: detail.into(),
        }
    }

    /// Create an `UnknownCommand` error.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Whether the user can likely fix this by correcting their input.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::UnknownCommand { .. }
        )
    }

    /// Process exit code for this error (for CLI use).
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            Self::UnknownCommand { .. } => 2,
            Self::Io(_) => 1,
        }
    }
}

/// Result type alias using `ObjdbgError`.
pub type Result<T> = std::result::Result<T, ObjdbgError>;
