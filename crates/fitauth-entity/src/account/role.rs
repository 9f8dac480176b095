//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four actor classes of the platform. Fixed at account creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Platform administrator.
    Admin,
    /// Gym manager.
    Manager,
    /// Trainer employed by a gym.
    Trainer,
    /// End user of the mobile app.
    Trainee,
}

impl AccountRole {
    /// Every role, in declaration order.
    pub const ALL: [AccountRole; 4] = [Self::Admin, Self::Manager, Self::Trainer, Self::Trainee];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether accounts of this role may be scoped to a gym.
    pub fn allows_tenant(&self) -> bool {
        !self.is_admin()
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Trainer => "trainer",
            Self::Trainee => "trainee",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = fitauth_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "trainer" => Ok(Self::Trainer),
            "trainee" => Ok(Self::Trainee),
            _ => Err(fitauth_core::AppError::validation(format!(
                "Invalid account role: '{s}'. Expected one of: admin, manager, trainer, trainee"
            ))),
        }
    }
}
