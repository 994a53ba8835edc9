//! # Scene File Watching
//!
//! Re-render support for `sdf-studio render --watch`. A [`notify`] watcher
//! observes the directory holding the scene file (editors often replace a
//! file rather than write it in place) and forwards a unit message whenever
//! that file is modified or created. The render loop blocks on the returned
//! channel and reloads the scene on each message.
//!
//! The caller must keep the returned [`RecommendedWatcher`] alive; dropping
//! it stops the notifications.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tracing::{error, info};

/// Start watching `scene_path`.
///
/// # Errors
///
/// Fails if the path has no parent directory that exists or the platform
/// watcher cannot be created.
pub fn watch_scene(scene_path: &Path) -> Result<(RecommendedWatcher, Receiver<()>)> {
    let target = scene_path
        .canonicalize()
        .with_context(|| format!("scene file {} not found", scene_path.display()))?;
    let directory = target
        .parent()
        .map(Path::to_path_buf)
        .context("scene file has no parent directory")?;

    let (tx, rx) = mpsc::channel();
    let handler_target = target.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        handle_file_event(&handler_target, &tx, res);
    })
    .context("failed to create file watcher")?;

    watcher
        .watch(&directory, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", directory.display()))?;
    info!("Watching {:?} for changes", target.file_name().unwrap_or_default());
    Ok((watcher, rx))
}

fn handle_file_event(target: &Path, tx: &Sender<()>, result: notify::Result<Event>) {
    match result {
        Ok(event) => {
            if is_relevant(target, &event) {
                // The receiver only disappears when the render loop exits.
                let _ = tx.send(());
            }
        }
        Err(e) => error!("File watcher error: {e:?}"),
    }
}

/// Modify/create events that touch `target`.
fn is_relevant(target: &Path, event: &Event) -> bool {
    (event.kind.is_modify() || event.kind.is_create()) && event.paths.iter().any(|p| p == target)
}
