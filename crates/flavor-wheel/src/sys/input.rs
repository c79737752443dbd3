use crate::events::{AppEvent, PointerEvent};
use crate::wheel::{Point, PointerId};
use async_channel::Sender;
use cupping::language::Language;
use cupping::model::NoteKind;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' takes {expected} argument(s), got {got}")]
    WrongArity {
        command: String,
        expected: usize,
        got: usize,
    },
    #[error("Invalid {what} '{value}'")]
    InvalidArgument { what: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Command {
    Down,
    Move,
    Up,
    Cancel,
    Leave,
    Lang,
    Pick,
    Select,
    Quit,
}

impl Command {
    fn arity(self) -> usize {
        match self {
            Command::Down | Command::Move => 3,
            Command::Up | Command::Cancel | Command::Leave => 1,
            Command::Lang | Command::Pick | Command::Select => 1,
            Command::Quit => 0,
        }
    }
}

fn arg<T: FromStr>(what: &'static str, value: &str) -> Result<T, InputError> {
    value.parse().map_err(|_| InputError::InvalidArgument {
        what,
        value: value.to_string(),
    })
}

fn point(x: &str, y: &str) -> Result<Point, InputError> {
    let x: f64 = arg("coordinate", x)?;
    let y: f64 = arg("coordinate", y)?;
    let p = Point::new(x, y);
    if !p.is_finite() {
        return Err(InputError::InvalidArgument {
            what: "coordinate",
            value: format!("{x} {y}"),
        });
    }
    Ok(p)
}

/// Parses one line of the stdin protocol:
///
/// ```text
/// down <pointer> <x> <y>
/// move <pointer> <x> <y>
/// up <pointer>
/// cancel <pointer>
/// leave <pointer>
/// lang <fr|en|es>
/// pick <fragrance|flavor>
/// select <coffee number>
/// quit
/// ```
///
/// Blank lines and `#` comments give `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<AppEvent>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default();
    let command = Command::from_str(name)
        .map_err(|_| InputError::UnknownCommand(name.to_string()))?;
    let args: Vec<&str> = words.collect();
    if args.len() != command.arity() {
        return Err(InputError::WrongArity {
            command: command.to_string(),
            expected: command.arity(),
            got: args.len(),
        });
    }

    let pointer = || arg::<u32>("pointer id", args[0]).map(PointerId::from);
    let event = match command {
        Command::Down => AppEvent::Pointer(PointerEvent::Down {
            id: pointer()?,
            at: point(args[1], args[2])?,
        }),
        Command::Move => AppEvent::Pointer(PointerEvent::Move {
            id: pointer()?,
            at: point(args[1], args[2])?,
        }),
        Command::Up => AppEvent::Pointer(PointerEvent::Up { id: pointer()? }),
        Command::Cancel => AppEvent::Pointer(PointerEvent::Cancel { id: pointer()? }),
        Command::Leave => AppEvent::Pointer(PointerEvent::Leave { id: pointer()? }),
        Command::Lang => AppEvent::SetLanguage(arg::<Language>("language", args[0])?),
        Command::Pick => AppEvent::Pick(arg::<NoteKind>("note kind", args[0])?),
        Command::Select => AppEvent::Select(arg("coffee number", args[0])?),
        Command::Quit => AppEvent::Quit,
    };
    Ok(Some(event))
}

/// Forwards parsed lines to `tx` until the input ends, then sends
/// [`AppEvent::Quit`].
pub async fn run_input<R: AsyncBufRead + Unpin>(reader: R, tx: Sender<AppEvent>) {
    let mut lines = reader.lines();
    let mut number = 0usize;

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                number += 1;
                match parse_line(&line) {
                    Ok(Some(event)) => {
                        if tx.send(event).await.is_err() {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("Skipping input line {}: {}", number, e),
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    let _ = tx.send(AppEvent::Quit).await;
}
