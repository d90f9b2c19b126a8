//! Menu Transition Tables
//!
//! One small state machine per submenu. Each is a pure function from the
//! current state and the token at the next level to a new state and a
//! verdict. Which table applies is decided by the current state alone, see
//! [`transition_for`].

pub mod angle;
pub mod initiate;
pub mod input;
pub mod root;
pub mod state;

pub use state::{AngleNode, Axis, InitiateNode, InputNode, MenuState, RootNode};

use crate::parser::{matches, Keyword};

/// Outcome of a single transition step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Descend to the next level
    Continue,
    Query,
    Command,
    /// Nothing recognized at the root
    Error,
    /// A prefix was recognized but this level was not
    PartialError,
}

impl Verdict {
    pub fn code(self) -> i32 {
        match self {
            Verdict::Continue => 0,
            Verdict::Query => 1,
            Verdict::Command => 2,
            Verdict::Error => -2,
            Verdict::PartialError => -3,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Verdict::Continue
    }
}

/// New state plus verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: MenuState,
    pub verdict: Verdict,
}

impl Transition {
    pub fn new(next: MenuState, verdict: Verdict) -> Self {
        Self { next, verdict }
    }

    pub fn descend(next: MenuState) -> Self {
        Self::new(next, Verdict::Continue)
    }

    pub fn command(next: MenuState) -> Self {
        Self::new(next, Verdict::Command)
    }

    pub fn query(next: MenuState) -> Self {
        Self::new(next, Verdict::Query)
    }

    /// Stay on the deepest resolved state and stop
    pub fn partial(current: MenuState) -> Self {
        Self::new(current, Verdict::PartialError)
    }

    pub fn error() -> Self {
        Self::new(MenuState::None, Verdict::Error)
    }
}

/// Signature shared by every submenu table
pub type TransitionFn = fn(MenuState, &[u8]) -> Transition;

/// Submenus of the command tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submenu {
    Root,
    Input,
    AxisAngle,
    Initiate,
}

impl Submenu {
    /// Submenu that continues parsing from `state`.
    ///
    /// `None` for terminal states and for nodes without children.
    pub fn for_state(state: MenuState) -> Option<Submenu> {
        match state {
            MenuState::None => Some(Submenu::Root),
            MenuState::Root(RootNode::Input) | MenuState::Input(_) => Some(Submenu::Input),
            MenuState::Root(RootNode::Initiate) => Some(Submenu::Initiate),
            MenuState::AxisAngle {
                node: AngleNode::Angle | AngleNode::Limit,
                ..
            } => Some(Submenu::AxisAngle),
            MenuState::Root(_) | MenuState::AxisAngle { .. } | MenuState::Initiate(_) => None,
        }
    }
}

const TABLES: [(Submenu, TransitionFn); 4] = [
    (Submenu::Root, root::step),
    (Submenu::Input, input::step),
    (Submenu::AxisAngle, angle::step),
    (Submenu::Initiate, initiate::step),
];

/// Transition function that applies from `state`, if any
pub fn transition_for(state: MenuState) -> Option<TransitionFn> {
    let submenu = Submenu::for_state(state)?;
    TABLES
        .iter()
        .find(|(candidate, _)| *candidate == submenu)
        .map(|(_, step)| *step)
}

/// Try the admissible keywords in order and hand the first match to `child`.
///
/// A token matching nothing leaves the state where it was with a partial
/// verdict; there is no backtracking.
pub(crate) fn descend_first_match(
    current: MenuState,
    token: &[u8],
    admissible: &[Keyword],
    child: impl Fn(Keyword) -> Option<Transition>,
) -> Transition {
    admissible
        .iter()
        .copied()
        .find(|keyword| matches(token, *keyword))
        .and_then(child)
        .unwrap_or_else(|| Transition::partial(current))
}
