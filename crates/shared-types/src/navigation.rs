//! Role-gated navigation and dashboard catalogs.
//!
//! Each catalog is a base list visible to everyone plus two optional groups.
//! [`build_entries`] appends at most one group, chosen by [`Role::group`].

use crate::{Role, RoleGroup};

/// A link in a static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEntry {
    pub label: &'static str,
    pub route: &'static str,
    /// Group that unlocks this entry; `None` for base entries.
    pub required_role: Option<RoleGroup>,
}

impl NavigationEntry {
    pub const fn public(label: &'static str, route: &'static str) -> Self {
        Self {
            label,
            route,
            required_role: None,
        }
    }

    pub const fn gated(label: &'static str, route: &'static str, group: RoleGroup) -> Self {
        Self {
            label,
            route,
            required_role: Some(group),
        }
    }
}

/// A dashboard tile: a catalog entry plus a one-line summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardCard {
    pub entry: NavigationEntry,
    pub summary: &'static str,
}

/// Base entries plus the admin-only and lecturer-only groups, each in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCatalog<T: 'static> {
    pub base: &'static [T],
    pub admin: &'static [T],
    pub lecturer: &'static [T],
}

impl<T> RoleCatalog<T> {
    fn group(&self, group: RoleGroup) -> &'static [T] {
        match group {
            RoleGroup::Admin => self.admin,
            RoleGroup::Lecturer => self.lecturer,
        }
    }
}

/// Entries to render for `role`: the base list, then the role's group if it has one.
///
/// `None` (signed out, or session not resolved yet) and roles without a group
/// get the base list alone.
pub fn build_entries<T: Clone>(role: Option<Role>, catalog: &RoleCatalog<T>) -> Vec<T> {
    let extra = role
        .and_then(|r| r.group())
        .map(|g| catalog.group(g))
        .unwrap_or(&[]);

    let mut entries = Vec::with_capacity(catalog.base.len() + extra.len());
    entries.extend_from_slice(catalog.base);
    entries.extend_from_slice(extra);
    entries
}

pub const NAV_BASE: &[NavigationEntry] = &[
    NavigationEntry::public("Home", "/"),
    NavigationEntry::public("About", "/about"),
    NavigationEntry::public("Blog", "/blog"),
    NavigationEntry::public("Gallery", "/gallery"),
    NavigationEntry::public("Sports", "/sports"),
    NavigationEntry::public("Contact", "/contact"),
    NavigationEntry::public("Dashboard", "/dashboard"),
];

pub const NAV_ADMIN: &[NavigationEntry] = &[NavigationEntry::gated("Admin", "/admin", RoleGroup::Admin)];

pub const NAV_LECTURER: &[NavigationEntry] =
    &[NavigationEntry::gated("Lecturer Hub", "/lecturer", RoleGroup::Lecturer)];

/// Top navigation bar.
pub const SITE_NAVIGATION: RoleCatalog<NavigationEntry> = RoleCatalog {
    base: NAV_BASE,
    admin: NAV_ADMIN,
    lecturer: NAV_LECTURER,
};

pub const DASHBOARD_BASE: &[DashboardCard] = &[
    DashboardCard {
        entry: NavigationEntry::public("Gallery", "/gallery"),
        summary: "Photos from recent union events.",
    },
    DashboardCard {
        entry: NavigationEntry::public("Sports", "/sports"),
        summary: "Teams, training sessions and fixtures.",
    },
    DashboardCard {
        entry: NavigationEntry::public("Blog", "/blog"),
        summary: "News and announcements from the committee.",
    },
];

pub const DASHBOARD_ADMIN: &[DashboardCard] = &[DashboardCard {
    entry: NavigationEntry::gated("Admin Overview", "/admin", RoleGroup::Admin),
    summary: "Review the latest gallery uploads and sports listings.",
}];

pub const DASHBOARD_LECTURER: &[DashboardCard] = &[DashboardCard {
    entry: NavigationEntry::gated("Lecturer Hub", "/lecturer", RoleGroup::Lecturer),
    summary: "Office hours, society sponsorship and staff notices.",
}];

/// Dashboard grid.
pub const DASHBOARD_CARDS: RoleCatalog<DashboardCard> = RoleCatalog {
    base: DASHBOARD_BASE,
    admin: DASHBOARD_ADMIN,
    lecturer: DASHBOARD_LECTURER,
};
