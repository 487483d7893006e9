//! Store users: customers and administrators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::UserId;
use crate::{Error, Result};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|_| unreachable!("static regex"))
});

/// Kind of user requested at registration.
///
/// Wire values are `"cliente"` and `"admin"` (exact match).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    /// A customer who can place orders.
    Customer,
    /// A store administrator.
    Admin,
}

impl UserKind {
    /// Wire representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "cliente",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for UserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cliente" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            other => Err(Error::InvalidUserKind(other.to_string())),
        }
    }
}

/// Role of a registered user, with role-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    /// Customer with an optional postal address.
    Customer {
        /// Postal address for deliveries
        address: Option<String>,
    },
    /// Store administrator.
    Admin,
}

/// A registered store user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique ID
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Role and role-specific data
    pub role: Role,
}

impl User {
    /// Builds a new user of the given kind, validating name and email.
    ///
    /// `address` is kept only for customers.
    pub fn new(
        kind: UserKind,
        name: impl Into<String>,
        email: impl Into<String>,
        address: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(Error::validation_field("nombre", "must not be empty"));
        }
        validate_email(&email)?;

        let role = match kind {
            UserKind::Customer => Role::Customer { address },
            UserKind::Admin => Role::Admin,
        };

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            role,
        })
    }

    /// Whether this user is an administrator.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Whether this user is a customer.
    pub fn is_customer(&self) -> bool {
        matches!(self.role, Role::Customer { .. })
    }

    /// Postal address, for customers that provided one.
    pub fn address(&self) -> Option<&str> {
        match &self.role {
            Role::Customer { address } => address.as_deref(),
            Role::Admin => None,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.name, self.email)?;
        if let Role::Customer { address } = &self.role {
            write!(f, " | Address: {}", address.as_deref().unwrap_or("-"))?;
        }
        Ok(())
    }
}

/// Checks that `email` looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(Error::validation_field(
            "email",
            format!("'{email}' is not a valid email address"),
        ))
    }
}
