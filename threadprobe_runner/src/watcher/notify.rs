use std::{mem, path::Path, sync::mpsc::Sender};

use log::{debug, error};
use notify::{
	event::{Event, EventKind},
	RecommendedWatcher, RecursiveMode, Watcher,
};

use super::WatcherEvent;

pub struct NotifyWatcher;

impl NotifyWatcher {
	pub fn new() -> Self {
		Self
	}
}

impl super::Watcher for NotifyWatcher {
	fn run(&self, filepath: impl AsRef<Path>, sender: Sender<WatcherEvent>) -> Result<(), String> {
		let path = filepath.as_ref().to_owned();
		let dir = path
			.parent()
			.ok_or_else(|| format!("Failed to get parent directory of `{}`", path.display()))?
			.to_owned();
		if !dir.is_dir() {
			return Err(format!("Directory `{}` does not exist", dir.display()));
		}

		debug!("Watching `{}` for log activity", path.display());

		// The log file is created by the module, so the watch is attached to
		// its directory and filtered down to the one file.
		let log_name = path.file_name().map(|name| name.to_owned());
		let watcher_result: Result<RecommendedWatcher, _> =
			Watcher::new(move |res: Result<Event, _>| match res {
				Ok(event) => {
					let concerns_log = event
						.paths
						.iter()
						.any(|event_path| event_path.file_name() == log_name.as_deref());
					if !concerns_log {
						return;
					}
					let watcher_event = match event.kind {
						EventKind::Create(_) => Some(WatcherEvent::Created),
						EventKind::Modify(_) => Some(WatcherEvent::Changed),
						EventKind::Remove(_) => Some(WatcherEvent::Destroyed),
						_ => None,
					};
					if let Some(watcher_event) = watcher_event {
						// A closed receiver means the session is over.
						let _ = sender.send(watcher_event);
					}
				}
				Err(_) => {
					error!("Filesystem watcher error");
				}
			});

		if let Ok(mut watcher) = watcher_result {
			match watcher.watch(&dir, RecursiveMode::NonRecursive) {
				Ok(_) => {
					// The watch must outlive this call for the whole session.
					mem::forget(watcher);
					Ok(())
				}
				Err(_) => Err("Failed to attach filesystem watcher to file".to_string()),
			}
		} else {
			Err("Failed to instantiate filesystem watcher".to_string())
		}
	}
}
