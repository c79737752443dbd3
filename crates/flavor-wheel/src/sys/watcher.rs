use crate::events::AppEvent;
use async_channel::Sender;
use cupping::config;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;

/// Whether a filesystem event touches the config file itself.
pub fn touches_config(event: &Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Sends [`AppEvent::ConfigReload`] whenever the config file changes.
///
/// The parent directory is watched rather than the file, so editors that
/// replace the file on save are still seen.
pub async fn watch_config(tx: Sender<AppEvent>) {
    let config_path = match config::get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher disabled: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };
    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Config watcher disabled, cannot create {}: {}", config_dir.display(), e);
        return;
    }

    let (fs_tx, fs_rx) = async_channel::unbounded();
    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = fs_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create config watcher: {}", e);
            return;
        }
    };
    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch {}: {}", config_dir.display(), e);
        return;
    }
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = fs_rx.recv().await {
        match res {
            Ok(event) if touches_config(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Config watch error: {}", e),
        }
    }
}
