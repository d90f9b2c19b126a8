//! Menu States
//!
//! Where in the command tree parsing currently stands. The state alone
//! determines the full parent path; the numeric event id derived from it is
//! always "parent id + fixed offset for the child keyword".

use std::fmt;

use crate::parser::Keyword;

/// Positioner axis addressed by `a0`..`a3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    A0,
    A1,
    A2,
    A3,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::A0, Axis::A1, Axis::A2, Axis::A3];

    pub fn index(self) -> u8 {
        match self {
            Axis::A0 => 0,
            Axis::A1 => 1,
            Axis::A2 => 2,
            Axis::A3 => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Axis> {
        Axis::ALL.get(usize::from(index)).copied()
    }

    /// Keyword spelling of the axis selector
    pub fn name(self) -> &'static str {
        match self {
            Axis::A0 => "a0",
            Axis::A1 => "a1",
            Axis::A2 => "a2",
            Axis::A3 => "a3",
        }
    }
}

/// Nodes directly under the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootNode {
    /// `*IDN?`
    Identify,
    /// `*RST`
    Reset,
    /// `*OPC`
    OperationComplete,
    /// `*OPC?`
    OperationCompleteQuery,
    /// `INPut`
    Input,
    /// `INITiate`
    Initiate,
    /// `SENSe`
    Sense,
}

/// Nodes of `INPut:POSition`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputNode {
    Position,
    Axis(Axis),
}

/// Nodes of `INPut:POSition:<axis>:ANGLe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleNode {
    Angle,
    Immediate,
    Direction,
    Limit,
    LimitLow,
    LimitHigh,
    LimitState,
}

/// Nodes of `INITiate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitiateNode {
    Immediate,
}

/// Deepest resolved node of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    /// Nothing resolved yet
    #[default]
    None,
    Root(RootNode),
    Input(InputNode),
    AxisAngle { axis: Axis, node: AngleNode },
    Initiate(InitiateNode),
}

const ROOT_IDENTIFY: u32 = 0x2000;
const ROOT_RESET: u32 = 0x4000;
const ROOT_OPC: u32 = 0x6000;
const ROOT_OPC_QUERY: u32 = 0x8000;
const ROOT_INPUT: u32 = 0xA000;
const ROOT_INITIATE: u32 = 0xC000;
const ROOT_SENSE: u32 = 0xE000;

const POSITION_OFFSET: u32 = 0x100;
const AXIS_STRIDE: u32 = 0x200;
const ANGLE_OFFSET: u32 = 0x20;
const IMMEDIATE_OFFSET: u32 = 0x1;
const LIMIT_OFFSET: u32 = 0x20;
const DIRECTION_OFFSET: u32 = 0x40;

fn axis_id(axis: Axis) -> u32 {
    ROOT_INPUT + AXIS_STRIDE * (u32::from(axis.index()) + 1)
}

impl MenuState {
    /// Every state of the tree, root first
    pub fn all() -> Vec<MenuState> {
        let mut states = vec![
            MenuState::None,
            MenuState::Root(RootNode::Identify),
            MenuState::Root(RootNode::Reset),
            MenuState::Root(RootNode::OperationComplete),
            MenuState::Root(RootNode::OperationCompleteQuery),
            MenuState::Root(RootNode::Input),
            MenuState::Root(RootNode::Initiate),
            MenuState::Root(RootNode::Sense),
            MenuState::Input(InputNode::Position),
            MenuState::Initiate(InitiateNode::Immediate),
        ];

        for axis in Axis::ALL {
            states.push(MenuState::Input(InputNode::Axis(axis)));
            for node in [
                AngleNode::Angle,
                AngleNode::Immediate,
                AngleNode::Direction,
                AngleNode::Limit,
                AngleNode::LimitLow,
                AngleNode::LimitHigh,
                AngleNode::LimitState,
            ] {
                states.push(MenuState::AxisAngle { axis, node });
            }
        }

        states
    }

    /// Stable numeric identifier handed to device-control logic
    pub fn event_id(self) -> u32 {
        match self {
            MenuState::None => 0,
            MenuState::Root(node) => match node {
                RootNode::Identify => ROOT_IDENTIFY,
                RootNode::Reset => ROOT_RESET,
                RootNode::OperationComplete => ROOT_OPC,
                RootNode::OperationCompleteQuery => ROOT_OPC_QUERY,
                RootNode::Input => ROOT_INPUT,
                RootNode::Initiate => ROOT_INITIATE,
                RootNode::Sense => ROOT_SENSE,
            },
            MenuState::Input(InputNode::Position) => ROOT_INPUT + POSITION_OFFSET,
            MenuState::Input(InputNode::Axis(axis)) => axis_id(axis),
            MenuState::AxisAngle { axis, node } => {
                let angle = axis_id(axis) + ANGLE_OFFSET;
                let limit = angle + LIMIT_OFFSET;
                match node {
                    AngleNode::Angle => angle,
                    AngleNode::Immediate => angle + IMMEDIATE_OFFSET,
                    AngleNode::Direction => angle + DIRECTION_OFFSET,
                    AngleNode::Limit => limit,
                    AngleNode::LimitLow => limit + 0x1,
                    AngleNode::LimitHigh => limit + 0x2,
                    AngleNode::LimitState => limit + 0x3,
                }
            }
            MenuState::Initiate(InitiateNode::Immediate) => ROOT_INITIATE + IMMEDIATE_OFFSET,
        }
    }

    /// Inverse of [`MenuState::event_id`]
    pub fn from_event_id(id: u32) -> Option<MenuState> {
        MenuState::all()
            .into_iter()
            .find(|state| state.event_id() == id)
    }

    pub fn is_none(self) -> bool {
        self == MenuState::None
    }

    /// Axis addressed by this state, if any
    pub fn axis(self) -> Option<Axis> {
        match self {
            MenuState::Input(InputNode::Axis(axis)) | MenuState::AxisAngle { axis, .. } => {
                Some(axis)
            }
            _ => None,
        }
    }

    /// Keywords leading from the root to this state
    pub fn keywords(self) -> Vec<Keyword> {
        match self {
            MenuState::None => Vec::new(),
            MenuState::Root(node) => vec![match node {
                RootNode::Identify => Keyword::Idn,
                RootNode::Reset => Keyword::Rst,
                RootNode::OperationComplete | RootNode::OperationCompleteQuery => Keyword::Opc,
                RootNode::Input => Keyword::Input,
                RootNode::Initiate => Keyword::Initiate,
                RootNode::Sense => Keyword::Sense,
            }],
            MenuState::Input(InputNode::Position) => vec![Keyword::Input, Keyword::Position],
            MenuState::Input(InputNode::Axis(axis)) => {
                vec![Keyword::Input, Keyword::Position, Keyword::Axis(axis)]
            }
            MenuState::AxisAngle { axis, node } => {
                let mut path = MenuState::Input(InputNode::Axis(axis)).keywords();
                path.push(Keyword::Angle);
                match node {
                    AngleNode::Angle => {}
                    AngleNode::Immediate => path.push(Keyword::Immediate),
                    AngleNode::Direction => path.push(Keyword::Direction),
                    AngleNode::Limit => path.push(Keyword::Limit),
                    AngleNode::LimitLow => path.extend([Keyword::Limit, Keyword::Low]),
                    AngleNode::LimitHigh => path.extend([Keyword::Limit, Keyword::High]),
                    AngleNode::LimitState => path.extend([Keyword::Limit, Keyword::State]),
                }
                path
            }
            MenuState::Initiate(InitiateNode::Immediate) => {
                vec![Keyword::Initiate, Keyword::Immediate]
            }
        }
    }

    /// Canonical long-form path, e.g. `:INPut:POSition:a0:ANGLe:IMMediate`
    pub fn path(self) -> String {
        match self {
            MenuState::None => String::new(),
            MenuState::Root(RootNode::Identify) => "*IDN?".to_string(),
            MenuState::Root(RootNode::OperationCompleteQuery) => "*OPC?".to_string(),
            MenuState::Root(RootNode::Reset | RootNode::OperationComplete) => {
                Keyword::display_name(self.keywords()[0])
            }
            _ => self
                .keywords()
                .into_iter()
                .map(|keyword| format!(":{}", keyword.display_name()))
                .collect(),
        }
    }
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<none>")
        } else {
            f.write_str(&self.path())
        }
    }
}
