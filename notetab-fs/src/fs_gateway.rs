//! Filesystem-backed [`PersistenceGateway`].

use crate::error::GatewayError;
use crate::filters::{FileFilter, default_filters};
use crate::fs_ops;
use crate::gateway::{PersistenceGateway, PickedFile};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The "dialog" half of the gateway: asks the user for a path.
///
/// Implementations may block (a native dialog, a terminal prompt); they are
/// always called from tokio's blocking pool. Returning `Ok(None)` means the
/// user cancelled.
pub trait PathPrompt: Send + Sync + 'static {
    /// Choose an existing file to open.
    fn pick_open(&self, filters: &[FileFilter]) -> io::Result<Option<PathBuf>>;

    /// Choose a destination for a file that has never been saved.
    fn pick_save(&self, default_name: &str, filters: &[FileFilter])
    -> io::Result<Option<PathBuf>>;
}

/// Gateway that reads and writes real files.
pub struct FsGateway<P> {
    prompt: Arc<P>,
    default_save_name: String,
}

impl<P> Clone for FsGateway<P> {
    fn clone(&self) -> Self {
        Self {
            prompt: Arc::clone(&self.prompt),
            default_save_name: self.default_save_name.clone(),
        }
    }
}

impl<P: PathPrompt> FsGateway<P> {
    pub fn new(prompt: P, default_save_name: impl Into<String>) -> Self {
        Self {
            prompt: Arc::new(prompt),
            default_save_name: default_save_name.into(),
        }
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }
}

impl<P: PathPrompt> PersistenceGateway for FsGateway<P> {
    async fn pick_and_read_text(&self) -> Result<Option<PickedFile>, GatewayError> {
        let prompt = Arc::clone(&self.prompt);
        let picked = tokio::task::spawn_blocking(move || -> Result<_, GatewayError> {
            let Some(path) = prompt
                .pick_open(&default_filters())
                .map_err(GatewayError::Prompt)?
            else {
                return Ok(None);
            };
            let content = fs_ops::read_text_file(&path)?;
            Ok(Some(PickedFile { content, path }))
        })
        .await??;

        match &picked {
            Some(file) => log::info!(
                "Gateway read OK: {:?} ({} bytes)",
                file.path,
                file.content.len()
            ),
            None => log::info!("Gateway open cancelled by user"),
        }
        Ok(picked)
    }

    async fn write_text(
        &self,
        content: &str,
        path: Option<&Path>,
    ) -> Result<Option<PathBuf>, GatewayError> {
        let prompt = Arc::clone(&self.prompt);
        let default_name = self.default_save_name.clone();
        let content = content.to_owned();
        let path = path.map(Path::to_path_buf);

        let written = tokio::task::spawn_blocking(move || -> Result<_, GatewayError> {
            let target = match path {
                Some(path) => path,
                None => match prompt
                    .pick_save(&default_name, &default_filters())
                    .map_err(GatewayError::Prompt)?
                {
                    Some(path) => path,
                    None => return Ok(None),
                },
            };
            fs_ops::write_text_file(&target, &content)?;
            Ok(Some(target))
        })
        .await;

        match written {
            Ok(Ok(Some(path))) => {
                log::info!("Gateway write OK: {:?}", path);
                Ok(Some(path))
            }
            Ok(Ok(None)) => {
                log::info!("Gateway save cancelled by user");
                Ok(None)
            }
            Ok(Err(e)) => {
                log::warn!("Gateway write FAIL: {}", e);
                Err(e)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Prompt that replays pre-recorded answers.
    #[derive(Default)]
    struct ScriptedPrompt {
        open: Mutex<Vec<Option<PathBuf>>>,
        save: Mutex<Vec<Option<PathBuf>>>,
        save_defaults: Mutex<Vec<String>>,
    }

    impl PathPrompt for ScriptedPrompt {
        fn pick_open(&self, _filters: &[FileFilter]) -> io::Result<Option<PathBuf>> {
            Ok(self.open.lock().unwrap().pop().flatten())
        }

        fn pick_save(
            &self,
            default_name: &str,
            _filters: &[FileFilter],
        ) -> io::Result<Option<PathBuf>> {
            self.save_defaults
                .lock()
                .unwrap()
                .push(default_name.to_string());
            Ok(self.save.lock().unwrap().pop().flatten())
        }
    }

    #[tokio::test]
    async fn test_pick_and_read_returns_content_and_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.md");
        std::fs::write(&path, "hello").unwrap();

        let prompt = ScriptedPrompt::default();
        prompt.open.lock().unwrap().push(Some(path.clone()));
        let gateway = FsGateway::new(prompt, "note.txt");

        let picked = gateway.pick_and_read_text().await.unwrap().unwrap();
        assert_eq!(picked.content, "hello");
        assert_eq!(picked.path, path);
    }

    #[tokio::test]
    async fn test_cancelled_open_is_none() {
        let prompt = ScriptedPrompt::default();
        prompt.open.lock().unwrap().push(None);
        let gateway = FsGateway::new(prompt, "note.txt");

        assert!(gateway.pick_and_read_text().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_to_known_path_skips_prompt() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("b.txt");
        let gateway = FsGateway::new(ScriptedPrompt::default(), "note.txt");

        let written = gateway.write_text("body", Some(&path)).await.unwrap();
        assert_eq!(written, Some(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "body");
        assert!(gateway.prompt().save_defaults.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_without_path_prompts_with_default_name() {
        let temp = tempdir().unwrap();
        let chosen = temp.path().join("chosen.md");
        let prompt = ScriptedPrompt::default();
        prompt.save.lock().unwrap().push(Some(chosen.clone()));
        let gateway = FsGateway::new(prompt, "untitled.md");

        let written = gateway.write_text("x", None).await.unwrap();
        assert_eq!(written, Some(chosen.clone()));
        assert_eq!(std::fs::read_to_string(&chosen).unwrap(), "x");
        assert_eq!(
            gateway.prompt().save_defaults.lock().unwrap().as_slice(),
            ["untitled.md".to_string()]
        );
    }

    #[tokio::test]
    async fn test_cancelled_save_writes_nothing() {
        let prompt = ScriptedPrompt::default();
        prompt.save.lock().unwrap().push(None);
        let gateway = FsGateway::new(prompt, "note.txt");

        assert_eq!(gateway.write_text("x", None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_failure_is_surfaced() {
        let gateway = FsGateway::new(ScriptedPrompt::default(), "note.txt");
        let err = gateway
            .write_text("x", Some(Path::new("relative/path.txt")))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotAbsolute(_)));
    }
}
