use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShellState {
    #[default]
    Start,
    Authoring { session: Uuid },
}

impl ShellState {
    pub fn session(&self) -> Option<Uuid> {
        match self {
            ShellState::Start => None,
            ShellState::Authoring { session } => Some(*session),
        }
    }
}
