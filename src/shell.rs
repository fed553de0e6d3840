use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::commands::{self, Command, ParseError};
use crate::config::Config;
use crate::editor;
use crate::navigation::{Destination, NavigationKey, Role, RoleRouter};
use crate::navigator;
use crate::session::{RetrieveSession, SessionError, SessionStore};
use crate::state::ShellState;
use crate::HandlerResult;

/// Line-driven host for authoring sessions and navigation.
#[derive(Debug)]
pub struct Shell {
    state: ShellState,
    store: Arc<SessionStore>,
    config: Config,
    router: RoleRouter<'static>,
    location: Option<Destination>,
    finished: bool,
}

impl Shell {
    pub fn new(store: Arc<SessionStore>, config: Config) -> Self {
        Self {
            state: ShellState::default(),
            store,
            config,
            router: RoleRouter::default(),
            location: None,
            finished: false,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The session's role, or the configured default outside a session.
    async fn current_role(&self) -> Result<Role, SessionError> {
        match self.state.session() {
            Some(session) => self.store.role(session).await,
            None => Ok(self.config.default_role),
        }
    }

    /// Handles one input line and returns the reply.
    pub async fn handle(&mut self, line: &str) -> HandlerResult {
        match line.parse::<Command>() {
            Ok(command) => self.dispatch(command).await,
            Err(ParseError::Empty) => Ok(String::new()),
            Err(err) => {
                tracing::info!(%err, line, "invalid input");
                Ok(format!("{err}. Enter /help to see usages."))
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn dispatch(&mut self, command: Command) -> HandlerResult {
        match (command, self.state) {
            (Command::Help, _) => commands::help(),
            (Command::Start(role), state) => self.start(role, state.session()).await,
            (Command::Quit, state) => {
                if let Some(session) = state.session() {
                    commands::cancel(&*self.store, session).await?;
                }
                self.state = ShellState::Start;
                self.finished = true;
                Ok("Bye.".to_owned())
            }
            (Command::Go(target), _) => {
                let role = self.current_role().await?;
                let destination = navigator::go(&self.router, role, &target);
                Ok(self.navigate(destination))
            }
            (Command::Join(game_id), _) => match navigator::join(&self.router, &game_id) {
                Some(destination) => Ok(self.navigate(destination)),
                None => Ok("Please type a game ID.".to_owned()),
            },
            (Command::Menu, _) => {
                let role = self.current_role().await?;
                Ok(navigator::menu(&self.router, role, self.location.as_ref()))
            }
            (_, ShellState::Start) => {
                Ok("No authoring session. Enter /start teacher to begin.".to_owned())
            }
            (Command::Cancel, ShellState::Authoring { session }) => {
                self.state = ShellState::Start;
                commands::cancel(&*self.store, session).await
            }
            (command, ShellState::Authoring { session }) => self.edit(command, session).await,
        }
    }

    async fn start(&mut self, role: Role, previous: Option<Uuid>) -> HandlerResult {
        let seeded = self.config.seed_example_question;
        let session = commands::start(&*self.store, previous, role, seeded).await?;
        self.state = ShellState::Authoring { session };

        let home = self.router.resolve_key(role, NavigationKey::Dashboard);
        self.location = Some(home);

        let reply = match role {
            Role::Teacher => {
                "Let's create a new quiz! Enter /add to add a question or /show to preview it."
            }
            Role::Student => "Session started. Students can browse with /go and /menu.",
        };
        Ok(reply.to_owned())
    }

    fn navigate(&mut self, destination: Destination) -> String {
        let reply = format!("Navigating to {destination}");
        self.location = Some(destination);
        reply
    }

    async fn edit(&self, command: Command, session: Uuid) -> HandlerResult {
        let store = &*self.store;
        let role = store.role(session).await?;
        if role == Role::Student && command != Command::Show {
            tracing::info!(%session, ?command, "student tried to edit a quiz");
            return Ok("Only teachers can author quizzes.".to_owned());
        }

        match command {
            Command::Show => editor::show(store, session).await,
            Command::Add => editor::add_question(store, session).await,
            Command::Prompt { id, text } => editor::edit_prompt(store, session, id, text).await,
            Command::Points { id, points } => editor::edit_points(store, session, id, points).await,
            Command::OptionText { id, index, text } => {
                editor::edit_option(store, session, id, index, text).await
            }
            Command::Correct { id, index } => {
                editor::edit_correctness(store, session, id, index).await
            }
            Command::Remove(id) => editor::remove_question(store, session, id).await,
            Command::Move { id, position } => {
                editor::move_question(store, session, id, position).await
            }
            other => {
                tracing::debug!(?other, "command has no authoring handler");
                Ok("Unable to handle the command. Enter /help to see usages.".to_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CloseSession;

    fn shell(seeded: bool) -> Shell {
        let config = Config {
            seed_example_question: seeded,
            ..Config::default()
        };
        Shell::new(Arc::new(SessionStore::new()), config)
    }

    #[tokio::test]
    async fn editing_requires_a_session() {
        let mut shell = shell(false);

        let reply = shell.handle("/add").await.unwrap();
        assert_eq!(reply, "No authoring session. Enter /start teacher to begin.");
        assert_eq!(shell.state(), ShellState::Start);
    }

    #[tokio::test]
    async fn teacher_authoring_flow() {
        let mut shell = shell(true);
        shell.handle("/start teacher").await.unwrap();
        let session = shell.state().session().unwrap();
        assert_eq!(shell.store.role(session).await, Ok(Role::Teacher));

        assert_eq!(
            shell.handle("/add").await.unwrap(),
            "Question #2 added at position 2."
        );
        shell.handle("/prompt 2 Capital of Italy?").await.unwrap();
        shell.handle("/option 2 2 Rome").await.unwrap();
        shell.handle("/correct 2 2").await.unwrap();
        shell.handle("/move 2 1").await.unwrap();

        let preview = shell.handle("/show").await.unwrap();
        let italy = preview.find("Question 1: Capital of Italy?").unwrap();
        let example = preview.find("Question 2: What is the value").unwrap();
        assert!(italy < example);
        assert!(preview.contains("(V) 2) Rome"));
    }

    #[tokio::test]
    async fn students_cannot_author() {
        let mut shell = shell(false);
        shell.handle("/start student").await.unwrap();

        assert_eq!(
            shell.handle("/add").await.unwrap(),
            "Only teachers can author quizzes."
        );
        assert_eq!(shell.handle("/show").await.unwrap(), "No questions yet.\n");
    }

    #[tokio::test]
    async fn go_uses_session_role() {
        let mut shell = shell(false);

        assert_eq!(
            shell.handle("/go quiz").await.unwrap(),
            "Navigating to /Join-Quiz"
        );
        shell.handle("/start teacher").await.unwrap();
        assert_eq!(
            shell.handle("/go quiz").await.unwrap(),
            "Navigating to /CreateQ"
        );
        assert_eq!(
            shell.handle("/go nonexistent_key").await.unwrap(),
            "Navigating to /"
        );
    }

    #[tokio::test]
    async fn role_comes_from_the_session_store() {
        let store = Arc::new(SessionStore::new());
        let mut shell = Shell::new(Arc::clone(&store), Config::default());
        shell.handle("/start teacher").await.unwrap();
        let session = shell.state().session().unwrap();

        store.close(session).await.unwrap();

        let err = shell.handle("/go quiz").await.unwrap_err();
        assert_eq!(err.to_string(), format!("no authoring session {session}"));
        assert!(shell.handle("/add").await.is_err());
    }

    #[tokio::test]
    async fn join_opens_the_quiz_page() {
        let mut shell = shell(false);

        assert_eq!(
            shell.handle("/join math/7 final").await.unwrap(),
            "Navigating to /quiz-page/math%2F7%20final"
        );
        assert_eq!(shell.handle("/join    ").await.unwrap(), "Please type a game ID.");

        let menu = shell.handle("/menu").await.unwrap();
        assert!(menu.lines().all(|line| !line.starts_with('>')));
    }

    #[tokio::test]
    async fn menu_follows_location() {
        let mut shell = shell(false);
        shell.handle("/start teacher").await.unwrap();
        shell.handle("/go /ClassesMain/7").await.unwrap();

        let menu = shell.handle("/menu").await.unwrap();
        assert!(menu.contains("> Classes"));
        assert!(!menu.contains("> Dashboard"));
    }

    #[tokio::test]
    async fn restarting_replaces_the_session() {
        let store = Arc::new(SessionStore::new());
        let mut shell = Shell::new(Arc::clone(&store), Config::default());

        shell.handle("/start teacher").await.unwrap();
        shell.handle("/start teacher").await.unwrap();
        assert_eq!(store.session_count().await, 1);

        shell.handle("/cancel").await.unwrap();
        assert_eq!(store.session_count().await, 0);
        assert_eq!(shell.state(), ShellState::Start);
    }

    #[tokio::test]
    async fn invalid_input_and_quit() {
        let mut shell = shell(false);

        assert_eq!(shell.handle("   ").await.unwrap(), "");
        assert_eq!(
            shell.handle("/dance").await.unwrap(),
            "unknown command 'dance'. Enter /help to see usages."
        );
        shell.handle("/start teacher").await.unwrap();
        assert_eq!(shell.handle("/quit").await.unwrap(), "Bye.");
        assert!(shell.is_finished());
    }
}
