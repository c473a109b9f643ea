//! Interactive text shell
//!
//! A line-oriented stand-in for a graphical editing surface: each command is
//! parsed into a [`Command`] and executed against a [`SharedEditor`], with
//! file dialogs answered on stdin through [`StdinPrompt`].

mod command;
mod prompt;

pub use command::{Command, HELP, ParseError, unescape};
pub use prompt::{StdinPrompt, resolve_input};

use anyhow::{Context, Result};
use notetab_fs::{FsGateway, PathPrompt, PickedFile, read_text_file};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::editor::{SaveOutcome, SharedEditor};
use crate::events::{EditorEvent, EventBuffer};
use crate::tab::{Tab, TabId};

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Executes shell commands against one editor
pub struct Shell<P> {
    editor: SharedEditor,
    gateway: FsGateway<P>,
    events: Arc<EventBuffer>,
}

impl<P: PathPrompt> Shell<P> {
    pub fn new(editor: SharedEditor, gateway: FsGateway<P>) -> Self {
        let events = Arc::new(EventBuffer::new());
        editor.lock().add_observer(events.clone());
        Self {
            editor,
            gateway,
            events,
        }
    }

    pub fn editor(&self) -> &SharedEditor {
        &self.editor
    }

    /// Read and execute commands from stdin until `quit` or end of input
    pub async fn run(&self) -> Result<()> {
        let mut stdout = io::stdout();
        writeln!(
            stdout,
            "notetab {} - type 'help' for commands",
            crate::VERSION
        )?;

        loop {
            self.print_prompt(&mut stdout)?;
            let Some(line) = read_stdin_line().await? else {
                if self.editor.lock().tabs().has_unsaved_changes() {
                    log::warn!("End of input with unsaved changes");
                }
                break;
            };
            match self.execute_line(&line, &mut stdout).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(stdout, "error: {:#}", e)?,
            }
        }
        Ok(())
    }

    fn print_prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        let label = {
            let editor = self.editor.lock();
            editor.active_tab().map(tab_label).unwrap_or_default()
        };
        write!(out, "[{}]> ", label)?;
        out.flush()?;
        Ok(())
    }

    /// Parse and execute one input line
    pub async fn execute_line<W: Write>(&self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };
        let flow = self.execute(command, out).await;
        self.report_events(out)?;
        flow
    }

    fn report_events<W: Write>(&self, out: &mut W) -> Result<()> {
        for event in self.events.drain_events() {
            if let EditorEvent::SyncMismatch { expected, found } = event {
                writeln!(
                    out,
                    "warning: document out of sync (expected tab {}, found {})",
                    expected.short(),
                    found.map_or_else(|| "none".to_string(), |id| id.short())
                )?;
            } else {
                log::trace!("Event: {:?}", event);
            }
        }
        Ok(())
    }

    /// Execute one parsed command
    pub async fn execute<W: Write>(&self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::New(title) => {
                let id = self.editor.lock().create(title);
                self.describe(id, "Created", out)?;
            }
            Command::Open(None) => {
                let opened = self
                    .editor
                    .open_from_gateway(&self.gateway)
                    .await
                    .context("Open failed")?;
                match opened {
                    Some(id) => self.describe(id, "Opened", out)?,
                    None => writeln!(out, "Open cancelled")?,
                }
            }
            Command::Open(Some(path)) => {
                let path = absolute(path)?;
                let content = {
                    let source = path.clone();
                    tokio::task::spawn_blocking(move || read_text_file(&source))
                        .await
                        .context("File reader task failed")?
                        .with_context(|| format!("Failed to open {}", path.display()))?
                };
                let id = self.editor.lock().open_picked(PickedFile { content, path });
                self.describe(id, "Opened", out)?;
            }
            Command::List => {
                let editor = self.editor.lock();
                let active = editor.active_id();
                for (i, tab) in editor.tabs().iter().enumerate() {
                    let marker = if Some(tab.id()) == active { '*' } else { ' ' };
                    let location = tab
                        .path()
                        .as_path()
                        .map_or_else(|| "(untitled)".to_string(), |p| p.display().to_string());
                    writeln!(out, "{}{:>2}. {}  {}", marker, i + 1, tab_label(tab), location)?;
                }
            }
            Command::Switch(index) => {
                let switched = self.editor.lock().switch_to_index(index);
                match switched {
                    Some(id) => self.describe(id, "Switched to", out)?,
                    None => writeln!(out, "No tab {}", index)?,
                }
            }
            Command::Next => {
                let switched = self.editor.lock().next_tab();
                self.report_cycle(switched, out)?;
            }
            Command::Prev => {
                let switched = self.editor.lock().prev_tab();
                self.report_cycle(switched, out)?;
            }
            Command::Close { index, force } => self.close(index, force, out)?,
            Command::Type(text) => {
                self.editor.lock().set_content(text);
            }
            Command::Append(text) => {
                self.editor.lock().append_content(&text);
            }
            Command::Title(title) => {
                self.editor.lock().set_title(title.clone());
                writeln!(out, "Renamed to '{}'", title)?;
            }
            Command::Show => {
                let editor = self.editor.lock();
                let Some(doc) = editor.document() else {
                    writeln!(out, "No document")?;
                    return Ok(Flow::Continue);
                };
                let location = doc
                    .path
                    .as_path()
                    .map_or_else(|| "untitled".to_string(), |p| p.display().to_string());
                let label = editor.active_tab().map(tab_label).unwrap_or_default();
                writeln!(out, "--- {} ({})", label, location)?;
                writeln!(out, "{}", doc.content)?;
            }
            Command::Save => {
                let outcome = self
                    .editor
                    .save_active(&self.gateway)
                    .await
                    .context("Save failed")?;
                report_save(&outcome, out)?;
            }
            Command::SaveAs(path) => {
                let path = absolute(path)?;
                let outcome = self
                    .editor
                    .save_active_to_path(path, &self.gateway)
                    .await
                    .context("Save failed")?;
                report_save(&outcome, out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit { force } => {
                let dirty: Vec<String> = {
                    let editor = self.editor.lock();
                    editor.tabs().dirty_tabs().map(|t| t.title().to_string()).collect()
                };
                if !force && !dirty.is_empty() {
                    writeln!(
                        out,
                        "Unsaved changes in: {}. Use quit! to discard them.",
                        dirty.join(", ")
                    )?;
                    return Ok(Flow::Continue);
                }
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn close<W: Write>(&self, index: Option<usize>, force: bool, out: &mut W) -> Result<()> {
        let mut editor = self.editor.lock();
        let target = match index {
            Some(n) => editor.tabs().id_at(n),
            None => editor.active_id(),
        };
        let Some(tab) = target.and_then(|id| editor.tabs().get(id)) else {
            writeln!(out, "No tab {}", index.unwrap_or_default())?;
            return Ok(());
        };
        let (id, title, dirty) = (tab.id(), tab.title().to_string(), tab.is_dirty());

        if dirty && !force && editor.config().confirm_close_dirty {
            writeln!(
                out,
                "'{}' has unsaved changes. Use close! to discard them.",
                title
            )?;
            return Ok(());
        }
        editor.close(id);
        writeln!(out, "Closed '{}'", title)?;
        Ok(())
    }

    fn report_cycle<W: Write>(&self, switched: Option<TabId>, out: &mut W) -> Result<()> {
        match switched {
            Some(id) => self.describe(id, "Switched to", out),
            None => {
                writeln!(out, "Only one tab open")?;
                Ok(())
            }
        }
    }

    fn describe<W: Write>(&self, id: TabId, verb: &str, out: &mut W) -> Result<()> {
        let editor = self.editor.lock();
        if let Some(tab) = editor.tabs().get(id) {
            writeln!(out, "{} '{}'", verb, tab_label(tab))?;
        }
        Ok(())
    }
}

fn tab_label(tab: &Tab) -> String {
    if tab.is_dirty() {
        format!("{}+", tab.title())
    } else {
        tab.title().to_string()
    }
}

fn report_save<W: Write>(outcome: &SaveOutcome, out: &mut W) -> Result<()> {
    match outcome {
        SaveOutcome::Saved { path, .. } => writeln!(out, "Saved {}", path.display())?,
        SaveOutcome::Cancelled => writeln!(out, "Save cancelled")?,
        SaveOutcome::NoActiveTab => writeln!(out, "Nothing to save")?,
        SaveOutcome::TabClosed { path, .. } => {
            writeln!(out, "Wrote {} (tab was closed meanwhile)", path.display())?
        }
    }
    Ok(())
}

/// Resolve a path argument against the working directory
fn absolute(path: PathBuf) -> Result<PathBuf> {
    let base = std::env::current_dir().context("Failed to read working directory")?;
    resolve_input(&path.to_string_lossy(), &base)
        .with_context(|| format!("Invalid path '{}'", path.display()))
}

async fn read_stdin_line() -> Result<Option<String>> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok::<_, io::Error>((read > 0).then_some(line))
    })
    .await
    .context("Stdin reader task failed")?
    .context("Failed to read command")
}
