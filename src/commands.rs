use std::str::FromStr;

use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::authoring::QuestionId;
use crate::navigation::Role;
use crate::session::{CloseSession, OpenSession};
use crate::HandlerResult;

/// One line of shell input. Option numbers and positions are typed 1-based
/// and stored 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Start(Role),
    Cancel,
    Show,
    Add,
    Prompt { id: QuestionId, text: String },
    Points { id: QuestionId, points: u32 },
    OptionText { id: QuestionId, index: usize, text: String },
    Correct { id: QuestionId, index: usize },
    Remove(QuestionId),
    Move { id: QuestionId, position: usize },
    Go(String),
    Join(String),
    Menu,
    Quit,
}

const DESCRIPTIONS: &[(&str, &str)] = &[
    ("/help", "display help."),
    ("/start <student|teacher>", "open an authoring session."),
    ("/cancel", "discard the current session."),
    ("/show", "preview the draft."),
    ("/add", "append a multiple-choice question."),
    ("/prompt <id> <text>", "set the question text."),
    ("/points <id> <n>", "set the question's points."),
    ("/option <id> <n> <text>", "rename option n."),
    ("/correct <id> <n>", "mark option n as the correct one."),
    ("/remove <id>", "delete a question."),
    ("/move <id> <position>", "move a question to another position."),
    ("/go <key|/path>", "resolve a navigation target."),
    ("/join <game id>", "open the quiz page for a game."),
    ("/menu", "show the sidebar for the current role."),
    ("/quit", "leave the shell."),
];

pub fn descriptions() -> String {
    DESCRIPTIONS
        .iter()
        .map(|(usage, description)| format!("{usage} - {description}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("/{command} needs <{argument}>")]
    Missing {
        command: &'static str,
        argument: &'static str,
    },
    #[error("<{argument}> must be a number from 1 to {}, got '{value}'", u32::MAX)]
    NotANumber { argument: &'static str, value: String },
    #[error(transparent)]
    Role(#[from] crate::navigation::route::UnknownRole),
}

struct Args<'a> {
    command: &'static str,
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn next_word(&mut self, argument: &'static str) -> Result<&'a str, ParseError> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            return Err(ParseError::Missing {
                command: self.command,
                argument,
            });
        }
        let (word, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        self.rest = tail;
        Ok(word)
    }

    fn number(&mut self, argument: &'static str) -> Result<u32, ParseError> {
        let word = self.next_word(argument)?;
        match word.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ParseError::NotANumber {
                argument,
                value: word.to_owned(),
            }),
        }
    }

    /// 1-based on input, 0-based on output.
    fn position(&mut self, argument: &'static str) -> Result<usize, ParseError> {
        Ok(self.number(argument)? as usize - 1)
    }

    fn text(self) -> String {
        self.rest.trim().to_owned()
    }

    fn required_text(self, argument: &'static str) -> Result<String, ParseError> {
        let command = self.command;
        let text = self.text();
        if text.is_empty() {
            return Err(ParseError::Missing { command, argument });
        }
        Ok(text)
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let word = word.strip_prefix('/').unwrap_or(word).to_ascii_lowercase();
        let args = |command: &'static str| Args { command, rest };

        let command = match word.as_str() {
            "help" => Command::Help,
            "start" => {
                let role = args("start").next_word("role")?.parse::<Role>()?;
                Command::Start(role)
            }
            "cancel" => Command::Cancel,
            "show" => Command::Show,
            "add" => Command::Add,
            "prompt" => {
                let mut args = args("prompt");
                let id = args.number("id")?;
                Command::Prompt { id, text: args.text() }
            }
            "points" => {
                let mut args = args("points");
                let id = args.number("id")?;
                let points = args.number("n")?;
                Command::Points { id, points }
            }
            "option" => {
                let mut args = args("option");
                let id = args.number("id")?;
                let index = args.position("n")?;
                let text = args.required_text("text")?;
                Command::OptionText { id, index, text }
            }
            "correct" => {
                let mut args = args("correct");
                let id = args.number("id")?;
                let index = args.position("n")?;
                Command::Correct { id, index }
            }
            "remove" => Command::Remove(args("remove").number("id")?),
            "move" => {
                let mut args = args("move");
                let id = args.number("id")?;
                let position = args.position("position")?;
                Command::Move { id, position }
            }
            "go" => Command::Go(args("go").required_text("key|/path")?),
            "join" => Command::Join(args("join").text()),
            "menu" => Command::Menu,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        Ok(command)
    }
}

pub(crate) fn help() -> HandlerResult {
    Ok(descriptions())
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn start<Store: OpenSession + CloseSession>(
    store: &Store,
    previous: Option<Uuid>,
    role: Role,
    seeded: bool,
) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(previous) = previous {
        tracing::info!(%previous, "replacing the current session");
        store.close(previous).await;
    }
    Ok(store.open(role, seeded).await)
}

#[instrument(level = "info", skip(store))]
pub(crate) async fn cancel<Store: CloseSession>(store: &Store, session: Uuid) -> HandlerResult {
    match store.close(session).await {
        Some(draft) => Ok(format!(
            "Cancelling session. {} question(s) discarded.",
            draft.len()
        )),
        None => Ok("Cancelling session.".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_slash() {
        assert_eq!("/help".parse::<Command>(), Ok(Command::Help));
        assert_eq!("ADD".parse::<Command>(), Ok(Command::Add));
        assert_eq!("start teacher".parse::<Command>(), Ok(Command::Start(Role::Teacher)));
    }

    #[test]
    fn option_numbers_are_one_based() {
        assert_eq!(
            "/correct 2 3".parse::<Command>(),
            Ok(Command::Correct { id: 2, index: 2 })
        );
        assert_eq!(
            "/option 1 4   Paris, France ".parse::<Command>(),
            Ok(Command::OptionText {
                id: 1,
                index: 3,
                text: "Paris, France".into()
            })
        );
        assert_eq!(
            "/move 5 1".parse::<Command>(),
            Ok(Command::Move { id: 5, position: 0 })
        );
    }

    #[test]
    fn prompt_text_may_be_empty() {
        assert_eq!(
            "/prompt 1".parse::<Command>(),
            Ok(Command::Prompt { id: 1, text: String::new() })
        );
        assert_eq!(
            "/prompt 1 What is 2 + 2?".parse::<Command>(),
            Ok(Command::Prompt { id: 1, text: "What is 2 + 2?".into() })
        );
    }

    #[test]
    fn go_keeps_paths_intact() {
        assert_eq!(
            "/go /games-mode/challenge".parse::<Command>(),
            Ok(Command::Go("/games-mode/challenge".into()))
        );
    }

    #[test]
    fn join_takes_the_whole_id() {
        assert_eq!(
            "/join  math/7 final ".parse::<Command>(),
            Ok(Command::Join("math/7 final".into()))
        );
        assert_eq!("/join".parse::<Command>(), Ok(Command::Join(String::new())));
    }

    #[test]
    fn reports_bad_arguments() {
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "/dance".parse::<Command>(),
            Err(ParseError::Unknown("dance".into()))
        );
        assert_eq!(
            "/points 1".parse::<Command>(),
            Err(ParseError::Missing { command: "points", argument: "n" })
        );
        assert_eq!(
            "/correct 1 0".parse::<Command>(),
            Err(ParseError::NotANumber { argument: "n", value: "0".into() })
        );
        let too_large = "/points 1 99999999999".parse::<Command>().unwrap_err();
        assert_eq!(
            too_large.to_string(),
            "<n> must be a number from 1 to 4294967295, got '99999999999'"
        );
        assert_eq!(
            "/option 1 2".parse::<Command>(),
            Err(ParseError::Missing { command: "option", argument: "text" })
        );
        assert!(matches!(
            "/start admin".parse::<Command>(),
            Err(ParseError::Role(_))
        ));
    }

    #[test]
    fn help_lists_every_command() {
        let help = descriptions();
        for (usage, _) in DESCRIPTIONS {
            assert!(help.contains(usage));
        }
    }
}
