//! Reloads the config when its file changes on disk.

use crate::config::{self, ConfigError};
use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::time::Duration;

/// Events closer together than this are treated as a single save.
pub const SETTLE_TIME: Duration = Duration::from_millis(150);

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match config::get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    // dropping the watcher stops delivery
    let _watcher = match watch_directory_of(&config_path, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Config watcher disabled: {}", e);
            return;
        }
    };

    log::debug!("Watching {} for changes", config_path.display());
    forward_reloads(&config_path, &bridge_rx, &tx, SETTLE_TIME).await;
}

/// Watches the directory rather than the file, so editors that replace the
/// file on save are still seen.
fn watch_directory_of(
    path: &Path,
    bridge: Sender<notify::Result<Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let dir = path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(dir)?;

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Whether `event` changes the file at `path`.
pub fn touches(event: &Event, path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == path)
}

/// Sends one reload per burst of changes to `path`. Returns once either
/// channel closes.
pub async fn forward_reloads(
    path: &Path,
    events: &Receiver<notify::Result<Event>>,
    tx: &Sender<AppEvent>,
    settle: Duration,
) {
    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if touches(&event, path) => {
                log::debug!("Config changed ({:?})", event.kind);
                let mut merged = 0;
                while let Ok(Ok(_)) = tokio::time::timeout(settle, events.recv()).await {
                    merged += 1;
                }
                if merged > 0 {
                    log::debug!("Merged {} further watch events", merged);
                }
                log::info!("Reloading {}", path.display());
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
