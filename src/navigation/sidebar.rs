use super::route::{NavigationKey, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarItem {
    pub label: &'static str,
    pub key: NavigationKey,
}

impl SidebarItem {
    const fn new(label: &'static str, key: NavigationKey) -> Self {
        Self { label, key }
    }
}

const STUDENT_SIDEBAR: [SidebarItem; 5] = [
    SidebarItem::new("Dashboard", NavigationKey::Dashboard),
    SidebarItem::new("Educational Mode", NavigationKey::Educational),
    SidebarItem::new("Games Mode", NavigationKey::Games),
    SidebarItem::new("Leaderboard", NavigationKey::Leaderboard),
    SidebarItem::new("Settings", NavigationKey::Settings),
];

const TEACHER_SIDEBAR: [SidebarItem; 5] = [
    SidebarItem::new("Dashboard", NavigationKey::Dashboard),
    SidebarItem::new("Classes", NavigationKey::Classes),
    SidebarItem::new("Announcements", NavigationKey::Announcements),
    SidebarItem::new("Leaderboard", NavigationKey::Leaderboard),
    SidebarItem::new("Settings", NavigationKey::Settings),
];

pub fn sidebar(role: Role) -> Vec<SidebarItem> {
    match role {
        Role::Student => STUDENT_SIDEBAR.to_vec(),
        Role::Teacher => TEACHER_SIDEBAR.to_vec(),
    }
}

/// Whether the item linking to `href` is highlighted while `pathname` is
/// shown. Nested pages (`/ClassesMain/123`) keep their parent active.
pub fn is_active(pathname: &str, href: &str) -> bool {
    match pathname.strip_prefix(href) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
