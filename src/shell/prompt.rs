//! Terminal stand-in for the open/save dialogs

use notetab_fs::{FileFilter, PathPrompt};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Resolve a path typed by the user
///
/// `~/` expands to the home directory and relative paths are taken from
/// `base`. Blank input means the prompt was dismissed.
pub fn resolve_input(input: &str, base: &Path) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let path = match input.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(input), |home| home.join(rest)),
        None => PathBuf::from(input),
    };
    Some(if path.is_absolute() {
        path
    } else {
        base.join(path)
    })
}

fn filter_summary(filters: &[FileFilter]) -> String {
    filters
        .iter()
        .map(|filter| filter.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Asks for paths on stdin; an empty answer cancels
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl StdinPrompt {
    fn ask(&self, question: &str) -> io::Result<Option<PathBuf>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let base = std::env::current_dir()?;
        Ok(resolve_input(&line, &base))
    }
}

impl PathPrompt for StdinPrompt {
    fn pick_open(&self, filters: &[FileFilter]) -> io::Result<Option<PathBuf>> {
        let question = format!("Open file ({}; empty to cancel): ", filter_summary(filters));
        let Some(path) = self.ask(&question)? else {
            return Ok(None);
        };
        if !filters.iter().any(|filter| filter.matches(&path)) {
            println!("Unsupported file type: {}", path.display());
            return Ok(None);
        }
        Ok(Some(path))
    }

    fn pick_save(
        &self,
        default_name: &str,
        _filters: &[FileFilter],
    ) -> io::Result<Option<PathBuf>> {
        let question = format!("Save as [{}] (empty to cancel): ", default_name);
        self.ask(&question)
    }
}
