use std::fmt;
use std::str::FromStr;

use crate::error::DeskError;

/// The three workstation roles offered by the sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Operator,
    Emt,
    Manager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Operator, Role::Emt, Role::Manager];

    /// Slug stored in the role field (the select's value).
    pub fn slug(self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Emt => "emt",
            Role::Manager => "manager",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Role::Operator => "Operator",
            Role::Emt => "EMT",
            Role::Manager => "Manager",
        }
    }

    pub fn destination(self) -> Destination {
        match self {
            Role::Operator => Destination::Operator,
            Role::Emt => Destination::Emt,
            Role::Manager => Destination::Manager,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Role {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "operator" => Ok(Role::Operator),
            "emt" => Ok(Role::Emt),
            "manager" => Ok(Role::Manager),
            _ => Err(DeskError::InvalidRole),
        }
    }
}

/// Where a successful sign-in (or the direct call button) routes to.
/// The page names survive from the web front end as stable route ids;
/// in the TUI each one is a console screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Call,
    Operator,
    Emt,
    Manager,
}

impl Destination {
    pub fn page(self) -> &'static str {
        match self {
            Destination::Call => "call.html",
            Destination::Operator => "operator.html",
            Destination::Emt => "emt.html",
            Destination::Manager => "manager.html",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Destination::Call => "Call Board",
            Destination::Operator => "Operator Console",
            Destination::Emt => "EMT Console",
            Destination::Manager => "Manager Console",
        }
    }
}
