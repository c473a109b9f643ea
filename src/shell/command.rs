//! Line-oriented command language of the interactive shell

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `new [title]`
    New(Option<String>),
    /// `open [path]`; without a path the user is prompted
    Open(Option<PathBuf>),
    List,
    /// `switch <n>`, 1-based
    Switch(usize),
    Next,
    Prev,
    /// `close [n]` / `close! [n]`; defaults to the active tab
    Close { index: Option<usize>, force: bool },
    /// `type <text>`: replace the buffer
    Type(String),
    /// `append <text>`
    Append(String),
    /// `title <text>`
    Title(String),
    Show,
    Save,
    /// `save-as <path>`
    SaveAs(PathBuf),
    Help,
    /// `quit` / `quit!`
    Quit { force: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("'{0}' is not a tab number")]
    InvalidIndex(String),
}

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  new [title]        create an empty tab
  open [path]        open a file (prompts when no path is given)
  list               list open tabs (* = active, + = unsaved)
  switch <n>         activate tab n
  next | prev        cycle through tabs
  close [n]          close tab n (default: active)
  close! [n]         close without asking about unsaved changes
  type <text>        replace the active buffer (\\n for newline)
  append <text>      append to the active buffer
  title <text>       rename the active tab
  show               print the active buffer
  save               save the active tab (prompts for untitled tabs)
  save-as <path>     save the active tab to a new path
  quit | quit!       exit (quit! discards unsaved changes)";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line, ""),
        };
        let arg = rest.trim();
        let optional = || (!arg.is_empty()).then(|| arg.to_string());

        let command = match word {
            "" => return Err(ParseError::Empty),
            "new" => Command::New(optional()),
            "open" => Command::Open(optional().map(PathBuf::from)),
            "list" | "ls" => Command::List,
            "switch" => Command::Switch(parse_index(required(arg, "switch", "a tab number")?)?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "close" | "close!" => Command::Close {
                index: optional().as_deref().map(parse_index).transpose()?,
                force: word.ends_with('!'),
            },
            // Text arguments keep their leading/trailing spaces apart from
            // the single separator after the command word
            "type" => Command::Type(unescape(rest)),
            "append" => Command::Append(unescape(required(rest, "append", "text")?)),
            "title" => Command::Title(required(arg, "title", "a title")?.to_string()),
            "show" => Command::Show,
            "save" => Command::Save,
            "save-as" => Command::SaveAs(PathBuf::from(required(arg, "save-as", "a path")?)),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit { force: false },
            "quit!" => Command::Quit { force: true },
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    arg: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    if arg.is_empty() {
        Err(ParseError::MissingArgument { command, what })
    } else {
        Ok(arg)
    }
}

fn parse_index(arg: &str) -> Result<usize, ParseError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::InvalidIndex(arg.to_string())),
    }
}

/// Expand `\n`, `\t` and `\\`; other escapes are kept verbatim
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
