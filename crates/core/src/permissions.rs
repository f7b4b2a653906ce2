//! Project-scoped permissions and the per-request authorization snapshot.
//!
//! Permission names must match the values stored in `roles.permissions`
//! (see `20261001000003_create_roles_and_members.sql`).

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A named capability granted to a role on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewIssues,
    AddIssueNotes,
    EditIssueNotes,
    EditOwnIssueNotes,
    ViewPrivateNotes,
    SetNotesPrivate,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Self::ViewIssues,
        Self::AddIssueNotes,
        Self::EditIssueNotes,
        Self::EditOwnIssueNotes,
        Self::ViewPrivateNotes,
        Self::SetNotesPrivate,
    ];

    /// String representation used in the database and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewIssues => "view_issues",
            Self::AddIssueNotes => "add_issue_notes",
            Self::EditIssueNotes => "edit_issue_notes",
            Self::EditOwnIssueNotes => "edit_own_issue_notes",
            Self::ViewPrivateNotes => "view_private_notes",
            Self::SetNotesPrivate => "set_notes_private",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown permission '{s}'"))
    }
}

/// A set of permissions, typically the union of every role a user holds on
/// one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse permission names, skipping names this service does not know.
    ///
    /// Roles are shared with other parts of the tracker, so unknown names are
    /// expected and are not an error.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|n| n.as_ref().parse().ok())
            .collect()
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    pub fn remove(&mut self, permission: Permission) -> bool {
        self.0.remove(&permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// User id standing for a caller without credentials.
///
/// Never assigned to a stored user (ids start at 1). The oracle answers for it
/// with the anonymous grant of public projects and nothing elsewhere.
pub const ANONYMOUS_USER_ID: DbId = 0;

/// Snapshot of what one user may do on one project, taken once per request.
///
/// The gate never consults shared role state; everything it needs to decide
/// is in this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: DbId,
    pub project_id: DbId,
    /// Administrators hold every permission on every project.
    pub is_admin: bool,
    pub permissions: PermissionSet,
}

impl AuthContext {
    pub fn new(user_id: DbId, project_id: DbId, permissions: PermissionSet) -> Self {
        Self {
            user_id,
            project_id,
            is_admin: false,
            permissions,
        }
    }

    pub fn admin(user_id: DbId, project_id: DbId) -> Self {
        Self {
            user_id,
            project_id,
            is_admin: true,
            permissions: PermissionSet::new(),
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.is_admin || self.permissions.contains(permission)
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id == ANONYMOUS_USER_ID
    }
}
