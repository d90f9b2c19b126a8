//! Keyword Dictionary
//!
//! Static table of every keyword the command tree understands, with its
//! canonical short and long spelling. Spellings are stored lowercase.

use crate::menu::Axis;

/// A recognized command keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `*OPC` (operation complete), also the base of `*OPC?`
    Opc,
    /// `*IDN`, only valid as the query `*IDN?`
    Idn,
    /// `*RST`
    Rst,
    Input,
    Initiate,
    Sense,
    Position,
    /// Axis selector `a0`..`a3`
    Axis(Axis),
    Angle,
    Immediate,
    Limit,
    Direction,
    Low,
    High,
    State,
}

/// Short and long spelling of a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub short: &'static str,
    pub long: &'static str,
}

impl Keyword {
    /// Every keyword in the dictionary
    pub const ALL: [Keyword; 18] = [
        Keyword::Opc,
        Keyword::Idn,
        Keyword::Rst,
        Keyword::Input,
        Keyword::Initiate,
        Keyword::Sense,
        Keyword::Position,
        Keyword::Axis(Axis::A0),
        Keyword::Axis(Axis::A1),
        Keyword::Axis(Axis::A2),
        Keyword::Axis(Axis::A3),
        Keyword::Angle,
        Keyword::Immediate,
        Keyword::Limit,
        Keyword::Direction,
        Keyword::Low,
        Keyword::High,
        Keyword::State,
    ];

    pub fn spelling(self) -> Spelling {
        let (short, long) = match self {
            Keyword::Opc => ("*opc", "*opc"),
            Keyword::Idn => ("*idn", "*idn"),
            Keyword::Rst => ("*rst", "*rst"),
            Keyword::Input => ("inp", "input"),
            Keyword::Initiate => ("init", "initiate"),
            Keyword::Sense => ("sens", "sense"),
            Keyword::Position => ("pos", "position"),
            Keyword::Axis(axis) => {
                let name = axis.name();
                (name, name)
            }
            Keyword::Angle => ("angl", "angle"),
            Keyword::Immediate => ("imm", "immediate"),
            Keyword::Limit => ("lim", "limit"),
            Keyword::Direction => ("dir", "direction"),
            Keyword::Low => ("low", "low"),
            Keyword::High => ("high", "high"),
            Keyword::State => ("stat", "state"),
        };
        Spelling { short, long }
    }

    /// `(short, long)` spelling
    pub fn spellings(self) -> (&'static str, &'static str) {
        let spelling = self.spelling();
        (spelling.short, spelling.long)
    }

    /// `(short_len, long_len)`; short never exceeds long
    pub fn lengths(self) -> (usize, usize) {
        let spelling = self.spelling();
        (spelling.short.len(), spelling.long.len())
    }

    /// First significant character, skipping the `*` of common commands.
    ///
    /// Used by the root table as a cheap index into its candidate list.
    pub fn initial(self) -> u8 {
        significant_initial(self.spelling().short.as_bytes())
    }

    /// Look up a keyword by either of its spellings.
    ///
    /// Names outside the dictionary are unknown and return `None`; an unknown
    /// keyword therefore can never take part in a match.
    pub fn lookup(name: &str) -> Option<Keyword> {
        Keyword::ALL
            .into_iter()
            .find(|keyword| matches(name.as_bytes(), *keyword))
    }

    /// Canonical SCPI rendering: long form with the short form uppercased,
    /// e.g. `POSition`, `*RST`, `a0`
    pub fn display_name(self) -> String {
        let Spelling { short, long } = self.spelling();
        if let Keyword::Axis(_) = self {
            return long.to_string();
        }
        let mut name = short.to_ascii_uppercase();
        name.push_str(&long[short.len()..]);
        name
    }
}

/// First character of a token after an optional leading `*`
pub fn significant_initial(token: &[u8]) -> u8 {
    match token {
        [b'*', next, ..] => next.to_ascii_lowercase(),
        [first, ..] => first.to_ascii_lowercase(),
        [] => 0,
    }
}

/// Decide whether `candidate` is exactly the short or the long form of
/// `keyword`. Intermediate truncations never match.
pub fn matches(candidate: &[u8], keyword: Keyword) -> bool {
    let Spelling { short, long } = keyword.spelling();
    let len = candidate.len();

    if len < short.len() {
        false
    } else if len == short.len() {
        candidate.eq_ignore_ascii_case(short.as_bytes())
    } else if len == long.len() {
        candidate.eq_ignore_ascii_case(long.as_bytes())
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_never_longer_than_long() {
        for keyword in Keyword::ALL {
            let (short, long) = keyword.lengths();
            assert!(short <= long, "{:?}", keyword);
        }
    }

    #[test]
    fn test_both_forms_match() {
        for keyword in Keyword::ALL {
            let (short, long) = keyword.spellings();
            assert!(matches(short.as_bytes(), keyword), "{}", short);
            assert!(matches(long.as_bytes(), keyword), "{}", long);
        }
    }

    #[test]
    fn test_intermediate_truncation_fails() {
        assert!(matches(b"angl", Keyword::Angle));
        assert!(matches(b"angle", Keyword::Angle));
        assert!(!matches(b"ang", Keyword::Angle));
        assert!(!matches(b"angle1", Keyword::Angle));

        assert!(!matches(b"posi", Keyword::Position));
        assert!(!matches(b"positio", Keyword::Position));
        assert!(!matches(b"immediat", Keyword::Immediate));
    }

    #[test]
    fn test_single_character_changes_fail() {
        for keyword in Keyword::ALL {
            let (short, long) = keyword.spellings();

            let truncated = &short.as_bytes()[..short.len() - 1];
            assert!(!matches(truncated, keyword), "{} truncated", short);

            let mut extended = long.as_bytes().to_vec();
            extended.push(b'1');
            assert!(!matches(&extended, keyword), "{} extended", long);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches(b"POSition", Keyword::Position));
        assert!(matches(b"POS", Keyword::Position));
        assert!(matches(b"*IdN", Keyword::Idn));
        assert!(matches(b"A3", Keyword::Axis(Axis::A3)));
    }

    #[test]
    fn test_same_length_different_text_fails() {
        assert!(!matches(b"*opd", Keyword::Opc));
        assert!(!matches(b"a4", Keyword::Axis(Axis::A0)));
        assert!(!matches(b"hig", Keyword::High));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Keyword::lookup("INITiate"), Some(Keyword::Initiate));
        assert_eq!(Keyword::lookup("init"), Some(Keyword::Initiate));
        assert_eq!(Keyword::lookup("a2"), Some(Keyword::Axis(Axis::A2)));
        assert_eq!(Keyword::lookup("bogus"), None);
        assert_eq!(Keyword::lookup(""), None);
    }

    #[test]
    fn test_initial_skips_star() {
        assert_eq!(Keyword::Opc.initial(), b'o');
        assert_eq!(Keyword::Input.initial(), b'i');
        assert_eq!(significant_initial(b"*"), b'*');
        assert_eq!(significant_initial(b""), 0);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Keyword::Position.display_name(), "POSition");
        assert_eq!(Keyword::Rst.display_name(), "*RST");
        assert_eq!(Keyword::Low.display_name(), "LOW");
        assert_eq!(Keyword::Axis(Axis::A1).display_name(), "a1");
    }
}
