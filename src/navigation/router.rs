use std::collections::HashMap;
use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;
use tracing::debug;

use super::route::{is_concrete, Destination, NavigationKey, Role, QUIZ_PAGE};

const ROOT: &str = "/";

/// Everything `encodeURIComponent` escapes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("no route for '{key}' as {role}")]
    Missing { role: Role, key: NavigationKey },
}

/// Immutable `(role, key) -> destination` mapping. A built table has an
/// entry for every role and every key.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<(Role, NavigationKey), Destination>,
    homes: HashMap<Role, Destination>,
}

#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: HashMap<(Role, NavigationKey), Destination>,
    homes: HashMap<Role, Destination>,
}

impl RouteTableBuilder {
    pub fn route(mut self, role: Role, key: NavigationKey, path: impl Into<String>) -> Self {
        self.routes.insert((role, key), Destination::new(path));
        self
    }

    /// Maps every key not routed yet for `role` to `path`.
    pub fn rest(mut self, role: Role, path: &str) -> Self {
        for key in NavigationKey::ALL {
            self.routes
                .entry((role, key))
                .or_insert_with(|| Destination::new(path));
        }
        self
    }

    pub fn home(mut self, role: Role, path: impl Into<String>) -> Self {
        self.homes.insert(role, Destination::new(path));
        self
    }

    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        for role in Role::ALL {
            for key in NavigationKey::ALL {
                if !self.routes.contains_key(&(role, key)) {
                    return Err(RouteTableError::Missing { role, key });
                }
            }
        }
        Ok(self.into_table())
    }

    /// Only for builders where `rest` ran for every role.
    fn into_table(mut self) -> RouteTable {
        for role in Role::ALL {
            self.homes
                .entry(role)
                .or_insert_with(|| Destination::new(ROOT));
        }
        RouteTable {
            routes: self.routes,
            homes: self.homes,
        }
    }
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// The EdVenture screens, built on first use and shared for the rest of
    /// the process.
    pub fn standard() -> &'static RouteTable {
        static STANDARD: OnceLock<RouteTable> = OnceLock::new();
        STANDARD.get_or_init(standard_table)
    }

    pub fn get(&self, role: Role, key: NavigationKey) -> Option<&Destination> {
        self.routes.get(&(role, key))
    }

    pub fn home(&self, role: Role) -> Destination {
        self.homes
            .get(&role)
            .cloned()
            .unwrap_or_else(|| Destination::new(ROOT))
    }
}

fn standard_table() -> RouteTable {
    use NavigationKey::*;
    use Role::*;

    RouteTable::builder()
        .route(Student, Dashboard, "/StudentD")
        .route(Student, Educational, "/educational")
        .route(Student, Games, "/games-mode")
        .route(Student, Leaderboard, "/leaderboard")
        .route(Student, Settings, "/StudentsSettings")
        .route(Student, Quiz, "/Join-Quiz")
        .route(Student, WorkCheck, "/work-check")
        .route(Student, CreateQuiz, "/Join-Quiz")
        .rest(Student, "/StudentD")
        .route(Teacher, Dashboard, "/TeacherD")
        .route(Teacher, Classes, "/ClassesMain")
        .route(Teacher, Announcements, "/Announcements")
        .route(Teacher, Leaderboard, "/leaderboardForT")
        .route(Teacher, Settings, "/Teachersettings")
        .route(Teacher, Quiz, "/CreateQ")
        .route(Teacher, CreateQuiz, "/CreateQuiz")
        .route(Teacher, Class1Students, "/class1-students")
        .route(Teacher, StudentReport, "/studentReport")
        .rest(Teacher, "/TeacherD")
        .into_table()
}

/// Resolves navigation intents against a route table.
#[derive(Debug, Clone, Copy)]
pub struct RoleRouter<'a> {
    table: &'a RouteTable,
}

impl Default for RoleRouter<'static> {
    fn default() -> Self {
        Self::new(RouteTable::standard())
    }
}

impl<'a> RoleRouter<'a> {
    pub fn new(table: &'a RouteTable) -> Self {
        Self { table }
    }

    /// Turns a navigation key, or an already concrete path, into a
    /// destination for `role`. Never fails: anything unknown lands on the
    /// role's home.
    pub fn resolve(&self, role: Role, key: &str) -> Destination {
        let key = key.trim();
        if is_concrete(key) {
            debug!(%role, key, "passing concrete destination through");
            return Destination::new(key);
        }

        match key.parse::<NavigationKey>() {
            Ok(nav) => self.resolve_key(role, nav),
            Err(_) => {
                debug!(%role, key, "unmapped navigation key, falling back to home");
                self.table.home(role)
            }
        }
    }

    /// The quiz page for a game ID typed by the player. Blank IDs give `None`.
    pub fn join_quiz(&self, game_id: &str) -> Option<Destination> {
        let game_id = game_id.trim();
        if game_id.is_empty() {
            return None;
        }
        let encoded = utf8_percent_encode(game_id, URI_COMPONENT);
        Some(Destination::new(format!("{QUIZ_PAGE}/{encoded}")))
    }

    pub fn resolve_key(&self, role: Role, key: NavigationKey) -> Destination {
        self.table
            .get(role, key)
            .cloned()
            .unwrap_or_else(|| self.table.home(role))
    }
}
