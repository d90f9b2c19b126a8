//! `INITiate` submenu

use super::{descend_first_match, InitiateNode, MenuState, RootNode, Transition};
use crate::parser::Keyword;

pub fn admissible(state: MenuState) -> &'static [Keyword] {
    match state {
        MenuState::Root(RootNode::Initiate) => &[Keyword::Immediate],
        _ => &[],
    }
}

/// `INITiate:IMMediate` starts a measurement sweep. It produces no data on
/// the line, so it is accepted as a command.
pub fn step(state: MenuState, token: &[u8]) -> Transition {
    descend_first_match(state, token, admissible(state), |keyword| match keyword {
        Keyword::Immediate => Some(Transition::command(MenuState::Initiate(
            InitiateNode::Immediate,
        ))),
        _ => None,
    })
}
