//! SCPI Parser
//!
//! Keyword dictionary, keyword matching and level extraction.
//! Knows nothing about the menu tree; that lives in [`crate::menu`].

pub mod keyword;
pub mod lexer;

pub use keyword::{matches, Keyword, Spelling};
pub use lexer::{extract_level, MIN_INPUT_LEN};

/// Keywords of a command line in hierarchy order, without resolving them.
///
/// Stops at the first missing level. Handy for diagnostics and logging.
pub fn split_levels(line: &[u8]) -> Vec<&[u8]> {
    let mut levels = Vec::new();
    let mut depth = 0;

    while let Ok(token) = lexer::extract_level(line, depth) {
        if token.is_empty() {
            break;
        }
        levels.push(token);
        depth += 1;
    }

    levels
}
