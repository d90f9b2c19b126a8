//! `INPut:POSition:<axis>:ANGLe` submenu: immediate move, direction and
//! the `LIMit` branch.

use super::{descend_first_match, AngleNode, MenuState, Transition};
use crate::parser::Keyword;

/// Keywords accepted after `state`
pub fn admissible(state: MenuState) -> &'static [Keyword] {
    match state {
        MenuState::AxisAngle {
            node: AngleNode::Angle,
            ..
        } => &[Keyword::Limit, Keyword::Direction, Keyword::Immediate],
        MenuState::AxisAngle {
            node: AngleNode::Limit,
            ..
        } => &[Keyword::Low, Keyword::High, Keyword::State],
        _ => &[],
    }
}

fn child(state: MenuState, keyword: Keyword) -> Option<Transition> {
    let MenuState::AxisAngle { axis, node } = state else {
        return None;
    };
    let at = |node| MenuState::AxisAngle { axis, node };

    let transition = match (node, keyword) {
        (AngleNode::Angle, Keyword::Immediate) => Transition::command(at(AngleNode::Immediate)),
        (AngleNode::Angle, Keyword::Direction) => Transition::command(at(AngleNode::Direction)),
        (AngleNode::Angle, Keyword::Limit) => Transition::descend(at(AngleNode::Limit)),
        (AngleNode::Limit, Keyword::Low) => Transition::command(at(AngleNode::LimitLow)),
        (AngleNode::Limit, Keyword::High) => Transition::command(at(AngleNode::LimitHigh)),
        (AngleNode::Limit, Keyword::State) => Transition::command(at(AngleNode::LimitState)),
        _ => return None,
    };
    Some(transition)
}

pub fn step(state: MenuState, token: &[u8]) -> Transition {
    descend_first_match(state, token, admissible(state), |keyword| {
        child(state, keyword)
    })
}
