//! Root menu: common commands (`*IDN?`, `*RST`, ...) and the entry
//! keywords of every submenu.

use super::{MenuState, RootNode, Transition, Verdict};
use crate::parser::keyword::significant_initial;
use crate::parser::{matches, Keyword};

struct RootEntry {
    keyword: Keyword,
    /// Entry only applies to tokens ending in `?`
    query: bool,
    node: RootNode,
    verdict: Verdict,
}

const ROOT_TABLE: [RootEntry; 7] = [
    RootEntry {
        keyword: Keyword::Idn,
        query: true,
        node: RootNode::Identify,
        verdict: Verdict::Query,
    },
    RootEntry {
        keyword: Keyword::Input,
        query: false,
        node: RootNode::Input,
        verdict: Verdict::Continue,
    },
    RootEntry {
        keyword: Keyword::Initiate,
        query: false,
        node: RootNode::Initiate,
        verdict: Verdict::Continue,
    },
    RootEntry {
        keyword: Keyword::Opc,
        query: true,
        node: RootNode::OperationCompleteQuery,
        verdict: Verdict::Query,
    },
    RootEntry {
        keyword: Keyword::Opc,
        query: false,
        node: RootNode::OperationComplete,
        verdict: Verdict::Command,
    },
    RootEntry {
        keyword: Keyword::Rst,
        query: false,
        node: RootNode::Reset,
        verdict: Verdict::Command,
    },
    RootEntry {
        keyword: Keyword::Sense,
        query: false,
        node: RootNode::Sense,
        verdict: Verdict::Continue,
    },
];

/// Resolve the first level of a command.
///
/// The first significant character picks the candidate entries, so only a
/// couple of comparisons run per token. No match is a full error: nothing
/// has been recognized yet.
pub fn step(_state: MenuState, token: &[u8]) -> Transition {
    let (base, query) = match token.split_last() {
        Some((b'?', base)) => (base, true),
        _ => (token, false),
    };
    let initial = significant_initial(token);

    ROOT_TABLE
        .iter()
        .filter(|entry| entry.query == query && entry.keyword.initial() == initial)
        .find(|entry| matches(base, entry.keyword))
        .map(|entry| Transition::new(MenuState::Root(entry.node), entry.verdict))
        .unwrap_or_else(Transition::error)
}
