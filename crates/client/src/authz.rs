//! Authorization guard: pure decisions derived from session claims.
//!
//! No I/O and no side effects - every function here is a policy check over
//! the current session (or its absence) and, where relevant, the target
//! entity. Navigation and the workflow engine both gate through this module
//! so the rules live in exactly one place.

use outlay_core::{PermissionLevel, RequestStatus, RoleKind};

use crate::session::{AuthError, Session};

/// Permission rank above which an identity may review team requests.
const REVIEW_THRESHOLD: PermissionLevel = PermissionLevel::new(1);

/// Where a freshly authenticated identity lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingRoute {
    /// Company directory (product admins).
    Companies,
    /// Own-company management view (company admins).
    MyCompany,
    /// General dashboard (everyone else).
    Dashboard,
}

impl LandingRoute {
    /// The route path, as the original dashboard spelled it.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Companies => "/companies",
            Self::MyCompany => "/mycompany",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Landing route for a role, applied after login and startup validation.
#[must_use]
pub const fn landing_route(role: &RoleKind) -> LandingRoute {
    match role {
        RoleKind::ProductAdmin => LandingRoute::Companies,
        RoleKind::CompanyAdmin => LandingRoute::MyCompany,
        RoleKind::Member(_) => LandingRoute::Dashboard,
    }
}

/// Whether this permission rank carries team-review authority.
#[must_use]
pub fn has_review_authority(level: PermissionLevel) -> bool {
    level > REVIEW_THRESHOLD
}

/// Whether the identity may see the team-requests view at all.
///
/// Admin roles manage companies and rosters, not expense decisions, so they
/// are excluded regardless of rank.
#[must_use]
pub fn can_view_team_requests(role: &RoleKind, level: PermissionLevel) -> bool {
    !role.is_admin() && has_review_authority(level)
}

/// Whether an identity with the given rank may approve or reject a request
/// in the given status.
#[must_use]
pub fn can_act_on_request(status: RequestStatus, level: PermissionLevel) -> bool {
    has_review_authority(level) && status == RequestStatus::Pending
}

/// Guard usable by any view: yields the session or a redirect-to-login
/// signal.
///
/// # Errors
///
/// `AuthError::NotAuthenticated` when no session is present.
pub fn require_authenticated(session: Option<&Session>) -> Result<&Session, AuthError> {
    session.ok_or(AuthError::NotAuthenticated)
}

/// Navigation destinations, one per dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    /// Company directory.
    Companies,
    /// Company creation form.
    CreateCompany,
    /// Own-company management.
    MyCompany,
    /// Employee directory.
    Employees,
    /// Roster upload.
    UploadRoster,
    /// Personal dashboard.
    Dashboard,
    /// Own reimbursement requests.
    MyRequests,
    /// New-request form.
    NewRequest,
    /// Team approval queue.
    TeamRequests,
}

/// Per-item navigation visibility for a role and permission rank.
#[must_use]
pub fn is_nav_visible(item: NavItem, role: &RoleKind, level: PermissionLevel) -> bool {
    match item {
        NavItem::Companies | NavItem::CreateCompany => *role == RoleKind::ProductAdmin,
        NavItem::MyCompany | NavItem::Employees | NavItem::UploadRoster => {
            *role == RoleKind::CompanyAdmin
        }
        NavItem::Dashboard | NavItem::MyRequests | NavItem::NewRequest => !role.is_admin(),
        NavItem::TeamRequests => can_view_team_requests(role, level),
    }
}

/// All navigation items visible to a role and permission rank, in display
/// order.
#[must_use]
pub fn visible_nav_items(role: &RoleKind, level: PermissionLevel) -> Vec<NavItem> {
    [
        NavItem::Companies,
        NavItem::CreateCompany,
        NavItem::MyCompany,
        NavItem::Employees,
        NavItem::UploadRoster,
        NavItem::Dashboard,
        NavItem::MyRequests,
        NavItem::NewRequest,
        NavItem::TeamRequests,
    ]
    .into_iter()
    .filter(|item| is_nav_visible(*item, role, level))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> RoleKind {
        RoleKind::Member(name.to_owned())
    }

    #[test]
    fn test_landing_route_per_role() {
        assert_eq!(
            landing_route(&RoleKind::ProductAdmin),
            LandingRoute::Companies
        );
        assert_eq!(
            landing_route(&RoleKind::CompanyAdmin),
            LandingRoute::MyCompany
        );
        assert_eq!(landing_route(&member("manager")), LandingRoute::Dashboard);
    }

    #[test]
    fn test_landing_route_paths() {
        assert_eq!(LandingRoute::Companies.path(), "/companies");
        assert_eq!(LandingRoute::MyCompany.path(), "/mycompany");
        assert_eq!(LandingRoute::Dashboard.path(), "/dashboard");
    }

    #[test]
    fn test_team_requests_require_rank_above_one() {
        assert!(can_view_team_requests(
            &member("manager"),
            PermissionLevel::new(2)
        ));
        assert!(!can_view_team_requests(
            &member("engineer"),
            PermissionLevel::new(1)
        ));
    }

    #[test]
    fn test_team_requests_hidden_from_admin_roles_regardless_of_rank() {
        assert!(!can_view_team_requests(
            &RoleKind::ProductAdmin,
            PermissionLevel::new(9)
        ));
        assert!(!can_view_team_requests(
            &RoleKind::CompanyAdmin,
            PermissionLevel::new(9)
        ));
    }

    #[test]
    fn test_can_act_only_on_pending_with_authority() {
        let reviewer = PermissionLevel::new(2);
        let employee = PermissionLevel::new(1);

        assert!(can_act_on_request(RequestStatus::Pending, reviewer));
        assert!(!can_act_on_request(RequestStatus::Pending, employee));
        assert!(!can_act_on_request(RequestStatus::Approved, reviewer));
        assert!(!can_act_on_request(RequestStatus::Rejected, reviewer));
    }

    #[test]
    fn test_require_authenticated_signals_redirect() {
        assert!(matches!(
            require_authenticated(None),
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_nav_visibility_product_admin() {
        let items = visible_nav_items(&RoleKind::ProductAdmin, PermissionLevel::new(1));
        assert_eq!(items, vec![NavItem::Companies, NavItem::CreateCompany]);
    }

    #[test]
    fn test_nav_visibility_company_admin() {
        let items = visible_nav_items(&RoleKind::CompanyAdmin, PermissionLevel::new(1));
        assert_eq!(
            items,
            vec![NavItem::MyCompany, NavItem::Employees, NavItem::UploadRoster]
        );
    }

    #[test]
    fn test_nav_visibility_member_gains_team_queue_with_rank() {
        let base = visible_nav_items(&member("engineer"), PermissionLevel::new(1));
        assert_eq!(
            base,
            vec![NavItem::Dashboard, NavItem::MyRequests, NavItem::NewRequest]
        );

        let reviewer = visible_nav_items(&member("manager"), PermissionLevel::new(2));
        assert!(reviewer.contains(&NavItem::TeamRequests));
    }
}
