//! Level Tokenizer
//!
//! Extracts the keyword at a given depth of a colon-delimited command.
//! Depth-indexed rather than iterator based so any level can be re-derived
//! on its own; command trees are only a handful of levels deep.

use crate::error::TokenizeError;

/// All command segments are at least this long
pub const MIN_INPUT_LEN: usize = 2;

/// Separator between hierarchy levels
pub const LEVEL_SEPARATOR: u8 = b':';

fn is_terminator(byte: u8) -> bool {
    matches!(byte, LEVEL_SEPARATOR | b' ' | 0)
}

/// Return the token found at `depth` (0 being the first keyword).
///
/// A single leading `:` is skipped. The token ends at the first `:`, space
/// or NUL strictly past its start, or at the end of the buffer. A level that
/// exists but is empty (`":INP:"` at depth 1) yields an empty token.
pub fn extract_level(buffer: &[u8], depth: usize) -> Result<&[u8], TokenizeError> {
    if buffer.len() < MIN_INPUT_LEN {
        return Err(TokenizeError::MalformedInput { min: MIN_INPUT_LEN });
    }

    let mut rest = buffer.strip_prefix(&[LEVEL_SEPARATOR]).unwrap_or(buffer);
    let mut remaining = depth;

    while remaining > 0 {
        let Some((&byte, tail)) = rest.split_first() else {
            return Err(TokenizeError::LevelNotFound { depth });
        };
        if byte == LEVEL_SEPARATOR {
            remaining -= 1;
        }
        rest = tail;
    }

    let end = rest
        .iter()
        .skip(1)
        .position(|&byte| is_terminator(byte))
        .map(|pos| pos + 1)
        .unwrap_or(rest.len());

    Ok(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_level() {
        assert_eq!(extract_level(b"*idn?", 0).unwrap(), b"*idn?");
        assert_eq!(extract_level(b":inp:pos", 0).unwrap(), b"inp");
        assert_eq!(extract_level(b"inp:pos", 0).unwrap(), b"inp");
    }

    #[test]
    fn test_deeper_levels() {
        let cmd = b":inp:pos:a0:angl:imm";
        assert_eq!(extract_level(cmd, 1).unwrap(), b"pos");
        assert_eq!(extract_level(cmd, 2).unwrap(), b"a0");
        assert_eq!(extract_level(cmd, 3).unwrap(), b"angl");
        assert_eq!(extract_level(cmd, 4).unwrap(), b"imm");
    }

    #[test]
    fn test_space_and_nul_terminate() {
        assert_eq!(extract_level(b":init:imm 45", 1).unwrap(), b"imm");
        assert_eq!(extract_level(b"*rst\0", 0).unwrap(), b"*rst");
        assert_eq!(extract_level(b"*idn? trailing", 0).unwrap(), b"*idn?");
    }

    #[test]
    fn test_first_terminator_wins() {
        assert_eq!(extract_level(b"*idn? a:b", 0).unwrap(), b"*idn?");
    }

    #[test]
    fn test_empty_trailing_level() {
        assert_eq!(extract_level(b":inp:", 1).unwrap(), b"");
    }

    #[test]
    fn test_level_not_found() {
        assert_eq!(
            extract_level(b":inp:pos:a0", 3),
            Err(TokenizeError::LevelNotFound { depth: 3 })
        );
        assert_eq!(
            extract_level(b"*rst", 1),
            Err(TokenizeError::LevelNotFound { depth: 1 })
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            extract_level(b":", 0),
            Err(TokenizeError::MalformedInput { min: 2 })
        );
        assert_eq!(
            extract_level(b"", 0),
            Err(TokenizeError::MalformedInput { min: 2 })
        );
    }

    #[test]
    fn test_leading_separator_is_not_a_token() {
        // only one leading separator is skipped; the second one starts the token
        assert_eq!(extract_level(b"::inp", 0).unwrap(), b":inp");
    }
}
