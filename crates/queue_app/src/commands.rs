use queue_core::EntryId;
use thiserror::Error;

/// A line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Click the control with `class` on an entry.
    Click { entry_id: EntryId, class: String },
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an entry number")]
    MissingEntry(&'static str),
    #[error("`{0}` is not an entry number")]
    BadEntry(String),
    #[error("`click` needs a control class")]
    MissingClass,
}

/// Parses one console line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<AppCommand>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb {
        "ingest" | "ignore" => {
            let verb: &'static str = if verb == "ingest" { "ingest" } else { "ignore" };
            AppCommand::Click {
                entry_id: entry_arg(verb, words.next())?,
                class: verb.to_string(),
            }
        }
        "click" => {
            let entry_id = entry_arg("click", words.next())?;
            let class = words.next().ok_or(CommandError::MissingClass)?;
            AppCommand::Click {
                entry_id,
                class: class.to_string(),
            }
        }
        "list" | "ls" => AppCommand::List,
        "help" | "?" => AppCommand::Help,
        "quit" | "exit" => AppCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn entry_arg(verb: &'static str, raw: Option<&str>) -> Result<EntryId, CommandError> {
    let raw = raw.ok_or(CommandError::MissingEntry(verb))?;
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::BadEntry(raw.to_string()))
}
