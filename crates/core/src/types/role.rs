//! Role identity and permission rank.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The kind of role a session holds.
///
/// The backend distinguishes two administrative roles by well-known
/// identifiers; every other value is a company-defined member role
/// (e.g. "manager", "engineer") and carries its authority in its
/// [`PermissionLevel`] rather than its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoleKind {
    /// Platform operator: manages companies.
    ProductAdmin,
    /// Company operator: manages roles and the employee roster.
    CompanyAdmin,
    /// A company-defined member role, identified by name.
    Member(String),
}

impl RoleKind {
    const PRODUCT_ADMIN: &'static str = "productAdmin";
    const COMPANY_ADMIN: &'static str = "companyAdmin";

    /// Whether this is one of the two administrative roles.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::ProductAdmin | Self::CompanyAdmin)
    }

    /// The wire identifier for this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ProductAdmin => Self::PRODUCT_ADMIN,
            Self::CompanyAdmin => Self::COMPANY_ADMIN,
            Self::Member(name) => name,
        }
    }
}

impl From<String> for RoleKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            Self::PRODUCT_ADMIN => Self::ProductAdmin,
            Self::COMPANY_ADMIN => Self::CompanyAdmin,
            _ => Self::Member(s),
        }
    }
}

impl From<&str> for RoleKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<RoleKind> for String {
    fn from(role: RoleKind) -> Self {
        role.as_str().to_owned()
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Integer permission rank; higher means more authority.
///
/// Levels form a total order. Level 1 is an ordinary employee; anything
/// above it carries team-review authority (the guard owns that threshold).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PermissionLevel(i32);

impl PermissionLevel {
    /// Create a permission level.
    #[must_use]
    pub const fn new(level: i32) -> Self {
        Self(level)
    }

    /// Get the underlying rank.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for PermissionLevel {
    fn from(level: i32) -> Self {
        Self(level)
    }
}
