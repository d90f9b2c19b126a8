//! Error types for tokenizing and interpreting command lines.

use thiserror::Error;

/// Failure to extract a hierarchy level from a command buffer
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("command buffer shorter than {min} bytes")]
    MalformedInput { min: usize },

    #[error("command has no level {depth}")]
    LevelNotFound { depth: usize },
}

/// Why a command that matched at least one level could not be completed.
///
/// Kept for diagnostics only. Callers see a single partial-match
/// classification whatever the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialCause {
    /// The input ended before the next level
    MissingLevel,
    /// The next level is present but matches none of the admissible keywords
    UnmatchedKeyword,
    /// The resolved node has no submenu to descend into
    NoSubmenu,
}

impl std::fmt::Display for PartialCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            PartialCause::MissingLevel => "missing level",
            PartialCause::UnmatchedKeyword => "unmatched keyword",
            PartialCause::NoSubmenu => "no submenu",
        };
        f.write_str(text)
    }
}

/// Terminal failure of an interpreter call
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InterpretError {
    #[error("malformed input: shorter than {min} bytes")]
    MalformedInput { min: usize },

    #[error("no root keyword matched")]
    NoRootMatch,

    #[error("partial match ({cause})")]
    PartialMatch { cause: PartialCause },

    #[error("internal interpreter error")]
    Internal,
}

impl InterpretError {
    /// Negative code reported at the boundary
    pub fn code(&self) -> i32 {
        match self {
            InterpretError::MalformedInput { .. } => -1,
            InterpretError::NoRootMatch => -2,
            InterpretError::PartialMatch { .. } => -3,
            InterpretError::Internal => -5,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, InterpretError::PartialMatch { .. })
    }
}

impl From<TokenizeError> for InterpretError {
    fn from(err: TokenizeError) -> Self {
        match err {
            TokenizeError::MalformedInput { min } => InterpretError::MalformedInput { min },
            TokenizeError::LevelNotFound { .. } => InterpretError::PartialMatch {
                cause: PartialCause::MissingLevel,
            },
        }
    }
}
