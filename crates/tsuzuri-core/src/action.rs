use std::fmt;
use std::str::FromStr;

/// Logical actions a key binding or control request can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Enable,
    Disable,
    Toggle,
    DeleteLeft,
    DeleteRight,
    MoveLeft,
    MoveRight,
    ExpandLeft,
    ExpandRight,
    Select,
    Compose,
    Accept,
    Discard,
    PrevCandidate,
    NextCandidate,
    CycleCandidate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl Action {
    pub const ALL: [Action; 16] = [
        Action::Enable,
        Action::Disable,
        Action::Toggle,
        Action::DeleteLeft,
        Action::DeleteRight,
        Action::MoveLeft,
        Action::MoveRight,
        Action::ExpandLeft,
        Action::ExpandRight,
        Action::Select,
        Action::Compose,
        Action::Accept,
        Action::Discard,
        Action::PrevCandidate,
        Action::NextCandidate,
        Action::CycleCandidate,
    ];

    /// Name used in configuration files and control requests.
    pub fn name(self) -> &'static str {
        match self {
            Action::Enable => "enable",
            Action::Disable => "disable",
            Action::Toggle => "toggle",
            Action::DeleteLeft => "delete-left",
            Action::DeleteRight => "delete-right",
            Action::MoveLeft => "move-left",
            Action::MoveRight => "move-right",
            Action::ExpandLeft => "expand-left",
            Action::ExpandRight => "expand-right",
            Action::Select => "select",
            Action::Compose => "compose",
            Action::Accept => "accept",
            Action::Discard => "discard",
            Action::PrevCandidate => "prev-candidate",
            Action::NextCandidate => "next-candidate",
            Action::CycleCandidate => "cycle-candidate",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::from_name(s).ok_or_else(|| UnknownAction(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
