//! 1 行 = 1 コマンド。パースと実行。

use projboard_core::app::{App, ViewError};
use projboard_core::domain::{BoardError, IdParseError, ProjectId, ProjectStatus, UnknownStatus};

use crate::CliError;

pub const HELP: &str = "\
commands:
  add <title> | <description> | <people>
  move <id> <active|finished>
  list
  json
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        title: String,
        description: String,
        people: String,
    },
    Move {
        id: ProjectId,
        status: ProjectStatus,
    },
    List,
    Json,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: move <id> <active|finished>")]
    MoveUsage,

    #[error(transparent)]
    Id(#[from] IdParseError),

    #[error(transparent)]
    Status(#[from] UnknownStatus),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb {
            "" => Ok(Command::Empty),
            "add" => {
                // 足りない欄は空文字のままフォームに渡し、検証エラーにさせる
                let mut fields = rest.splitn(3, '|').map(|s| s.trim().to_string());
                Ok(Command::Add {
                    title: fields.next().unwrap_or_default(),
                    description: fields.next().unwrap_or_default(),
                    people: fields.next().unwrap_or_default(),
                })
            }
            "move" => {
                let mut args = rest.split_whitespace();
                let (Some(id), Some(status), None) = (args.next(), args.next(), args.next())
                else {
                    return Err(CommandError::MoveUsage);
                };
                Ok(Command::Move {
                    id: id.parse()?,
                    status: status.parse()?,
                })
            }
            "list" | "ls" => Ok(Command::List),
            "json" => Ok(Command::Json),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// Run one command against the board.
///
/// User mistakes (bad form input, unknown id) become output so the session
/// keeps going; only serialization failures propagate.
pub fn execute(app: &mut App, command: Command) -> Result<Reply, CliError> {
    let out = match command {
        Command::Add {
            title,
            description,
            people,
        } => match app.add(&title, &description, &people) {
            Ok(p) => format!("added {} ({})", p.title, p.id),
            Err(ViewError::Board(BoardError::InvalidInput(e))) => {
                format!("Invalid input, please try again: {e}")
            }
            Err(e) => format!("error: {e}"),
        },
        Command::Move { id, status } => match app.move_to(id, status) {
            Ok(p) => format!("moved {} to {}", p.title, p.status),
            Err(e) => format!("error: {e}"),
        },
        Command::List => app.render(),
        Command::Json => serde_json::to_string_pretty(&app.store().snapshot())?,
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),
        Command::Empty => String::new(),
    };
    Ok(Reply::Output(out))
}
