//! `INPut:POSition:<axis>` submenu, down to the `ANGLe` node of an axis.

use super::{descend_first_match, AngleNode, Axis, InputNode, MenuState, RootNode, Transition};
use crate::parser::Keyword;

const AXES: [Keyword; 4] = [
    Keyword::Axis(Axis::A0),
    Keyword::Axis(Axis::A1),
    Keyword::Axis(Axis::A2),
    Keyword::Axis(Axis::A3),
];

/// Keywords accepted after `state`
pub fn admissible(state: MenuState) -> &'static [Keyword] {
    match state {
        MenuState::Root(RootNode::Input) => &[Keyword::Position],
        MenuState::Input(InputNode::Position) => &AXES,
        MenuState::Input(InputNode::Axis(_)) => &[Keyword::Angle],
        _ => &[],
    }
}

fn child(state: MenuState, keyword: Keyword) -> Option<Transition> {
    let next = match (state, keyword) {
        (MenuState::Root(RootNode::Input), Keyword::Position) => {
            MenuState::Input(InputNode::Position)
        }
        (MenuState::Input(InputNode::Position), Keyword::Axis(axis)) => {
            MenuState::Input(InputNode::Axis(axis))
        }
        (MenuState::Input(InputNode::Axis(axis)), Keyword::Angle) => MenuState::AxisAngle {
            axis,
            node: AngleNode::Angle,
        },
        _ => return None,
    };
    Some(Transition::descend(next))
}

pub fn step(state: MenuState, token: &[u8]) -> Transition {
    descend_first_match(state, token, admissible(state), |keyword| {
        child(state, keyword)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Verdict;

    #[test]
    fn test_position() {
        let input = MenuState::Root(RootNode::Input);
        for token in ["pos", "position"] {
            assert_eq!(
                step(input, token.as_bytes()),
                Transition::descend(MenuState::Input(InputNode::Position))
            );
        }
    }

    #[test]
    fn test_axis_selection() {
        let position = MenuState::Input(InputNode::Position);
        for axis in Axis::ALL {
            assert_eq!(
                step(position, axis.name().as_bytes()),
                Transition::descend(MenuState::Input(InputNode::Axis(axis)))
            );
        }
    }

    #[test]
    fn test_angle_keeps_axis() {
        let t = step(MenuState::Input(InputNode::Axis(Axis::A2)), b"angle");
        assert_eq!(
            t,
            Transition::descend(MenuState::AxisAngle {
                axis: Axis::A2,
                node: AngleNode::Angle
            })
        );
    }

    #[test]
    fn test_mismatch_is_partial_at_current_state() {
        let cases = [
            (MenuState::Root(RootNode::Input), "pos1"),
            (MenuState::Root(RootNode::Input), "po"),
            (MenuState::Root(RootNode::Input), "positio"),
            (MenuState::Input(InputNode::Position), "a"),
            (MenuState::Input(InputNode::Position), "a01"),
            (MenuState::Input(InputNode::Position), "a4"),
            (MenuState::Input(InputNode::Axis(Axis::A0)), "ang"),
            (MenuState::Input(InputNode::Axis(Axis::A0)), "angle1"),
            (MenuState::Input(InputNode::Axis(Axis::A0)), ""),
        ];
        for (state, token) in cases {
            let t = step(state, token.as_bytes());
            assert_eq!(t.verdict, Verdict::PartialError, "{}", token);
            assert_eq!(t.next, state, "{}", token);
        }
    }

    #[test]
    fn test_keyword_from_wrong_level() {
        // an axis selector is not valid directly under INPut
        let t = step(MenuState::Root(RootNode::Input), b"a0");
        assert_eq!(t, Transition::partial(MenuState::Root(RootNode::Input)));
    }

    #[test]
    fn test_admissible_sets_are_small() {
        for state in MenuState::all() {
            assert!(admissible(state).len() <= 4);
        }
    }
}
