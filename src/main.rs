use anyhow::{Context, Result};
use notetab::cli;
use notetab::editor::{Editor, SharedEditor};
use notetab::shell::{Shell, StdinPrompt};
use notetab_config::Config;
use notetab_fs::{FsGateway, PickedFile, read_text_file};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = cli::process_cli();
    // Routes all log::info!() etc. to <tmp>/notetab_debug.log.
    // CLI --log-level takes precedence over RUST_LOG, which beats the config.
    notetab::debug::init_log_bridge(options.log_level);

    log::info!("Starting notetab {}", notetab::VERSION);

    let config = load_config(options.config_path.as_deref());
    notetab::debug::apply_config_level(config.log_level.to_level_filter());

    // Gateway file I/O runs on tokio's blocking pool
    let runtime = Runtime::new().context("Failed to start tokio runtime")?;

    let save_name = config.default_save_name.clone();
    let mut editor = Editor::with_config(config);
    for path in &options.files {
        open_startup_file(&mut editor, path);
    }
    editor.ensure_active_tab();

    let shell = Shell::new(
        SharedEditor::new(editor),
        FsGateway::new(StdinPrompt, save_name),
    );
    let result = runtime.block_on(shell.run());

    log::info!("Shell exited, shutting down runtime");
    runtime.shutdown_timeout(Duration::from_secs(2));

    if let Err(ref e) = result {
        eprintln!("notetab: error: {e:#}");
    }
    result
}

/// Load the config, falling back to defaults when it cannot be read
fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        log::warn!("Using default config: {}", e);
        eprintln!("notetab: {e}; using defaults");
        Config::default()
    })
}

/// Open a file named on the command line
///
/// A file that does not exist yet becomes an empty tab bound to that path.
fn open_startup_file(editor: &mut Editor, path: &Path) {
    let path = match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => PathBuf::from(path),
    };

    if !path.exists() {
        log::info!("{} does not exist yet, opening empty tab", path.display());
        editor.open(String::new(), Some(path), None);
        return;
    }
    match read_text_file(&path) {
        Ok(content) => {
            editor.open_picked(PickedFile { content, path });
        }
        Err(e) => {
            log::warn!("Skipping {}: {}", path.display(), e);
            eprintln!("notetab: {e}");
        }
    }
}
