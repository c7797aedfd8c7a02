//! Actions a principal can attempt on a subject.

use std::fmt;

use serde::Serialize;

/// Closed set of actions checked by the ability.
///
/// `Manage` is the wildcard: an allow rule for `Manage` grants every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Manage,
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Manage,
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Manage => "manage",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// True for actions that change state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Action::Read)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
