//! Session context and role resolution
//!
//! The display-role override (role impersonation for reviewing another
//! role's dashboard) is resolved once at the boundary and the resulting
//! context is passed down by value. No component reads ambient global state
//! to decide what role it is rendering for.

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Analyst,
    Manager,
    Director,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analyst => write!(f, "analyst"),
            Self::Manager => write!(f, "manager"),
            Self::Director => write!(f, "director"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analyst" => Ok(Self::Analyst),
            "manager" => Ok(Self::Manager),
            "director" => Ok(Self::Director),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Per-session role context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Role the user actually holds
    pub actual_role: Role,

    /// Temporary display override, when impersonating another role
    pub display_role_override: Option<Role>,
}

impl SessionContext {
    pub fn new(actual_role: Role) -> Self {
        Self {
            actual_role,
            display_role_override: None,
        }
    }

    pub fn with_override(actual_role: Role, display_role_override: Role) -> Self {
        Self {
            actual_role,
            display_role_override: Some(display_role_override),
        }
    }

    /// Role the UI renders for
    pub fn effective_role(&self) -> Role {
        self.display_role_override.unwrap_or(self.actual_role)
    }
}
