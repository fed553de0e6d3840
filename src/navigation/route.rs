use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use thiserror::Error;

pub(crate) const QUIZ_PAGE: &str = "/quiz-page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Student, Role::Teacher];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}', expected 'student' or 'teacher'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}

/// Abstract navigation intents shared by sidebars, cards and buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKey {
    Dashboard,
    Educational,
    Games,
    Leaderboard,
    Settings,
    Quiz,
    WorkCheck,
    Classes,
    Announcements,
    Class1Students,
    StudentReport,
    CreateQuiz,
}

impl NavigationKey {
    pub const ALL: [NavigationKey; 12] = [
        NavigationKey::Dashboard,
        NavigationKey::Educational,
        NavigationKey::Games,
        NavigationKey::Leaderboard,
        NavigationKey::Settings,
        NavigationKey::Quiz,
        NavigationKey::WorkCheck,
        NavigationKey::Classes,
        NavigationKey::Announcements,
        NavigationKey::Class1Students,
        NavigationKey::StudentReport,
        NavigationKey::CreateQuiz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationKey::Dashboard => "dashboard",
            NavigationKey::Educational => "educational",
            NavigationKey::Games => "games",
            NavigationKey::Leaderboard => "leaderboard",
            NavigationKey::Settings => "settings",
            NavigationKey::Quiz => "quiz",
            NavigationKey::WorkCheck => "work_check",
            NavigationKey::Classes => "classes",
            NavigationKey::Announcements => "announcements",
            NavigationKey::Class1Students => "class1_students",
            NavigationKey::StudentReport => "student_report",
            NavigationKey::CreateQuiz => "create_quiz",
        }
    }
}

impl fmt::Display for NavigationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown navigation key '{0}'")]
pub struct UnknownKey(pub String);

impl FromStr for NavigationKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let key = match normalized.as_str() {
            "dashboard" => NavigationKey::Dashboard,
            "educational" | "edu" => NavigationKey::Educational,
            "games" | "games_mode" => NavigationKey::Games,
            "leaderboard" => NavigationKey::Leaderboard,
            "settings" => NavigationKey::Settings,
            "quiz" => NavigationKey::Quiz,
            "work_check" | "workcheck" => NavigationKey::WorkCheck,
            "classes" => NavigationKey::Classes,
            "announcements" => NavigationKey::Announcements,
            "class1_students" | "class1students" => NavigationKey::Class1Students,
            "student_report" | "studentreport" => NavigationKey::StudentReport,
            "create_quiz" | "createquiz" => NavigationKey::CreateQuiz,
            _ => return Err(UnknownKey(s.to_owned())),
        };
        Ok(key)
    }
}

/// A concrete navigation target, handed to the platform navigator as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination(String);

impl Destination {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_external(&self) -> bool {
        is_external(&self.0)
    }

    /// The decoded game ID of a `/quiz-page/<id>` destination.
    pub fn quiz_game_id(&self) -> Option<String> {
        let encoded = self.0.strip_prefix(QUIZ_PAGE)?.strip_prefix('/')?;
        if encoded.is_empty() {
            return None;
        }
        percent_decode_str(encoded)
            .decode_utf8()
            .ok()
            .map(|id| id.into_owned())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn is_external(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// True for inputs that already are a destination and bypass the route table.
pub(crate) fn is_concrete(target: &str) -> bool {
    target.starts_with('/') || is_external(target)
}
