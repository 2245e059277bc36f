use std::{path::Path, sync::mpsc::Sender, time::Duration};

pub mod notify;
pub mod poll;

use crate::cli::WatcherType;

#[derive(Debug)]
pub enum WatcherEvent {
	Created,
	Changed,
	Destroyed,
}

pub trait Watcher {
	fn run(&self, filepath: impl AsRef<Path>, sender: Sender<WatcherEvent>) -> Result<(), String>;
}

/// Starts watching the log file with the configured watcher type. The file
/// does not need to exist yet; its creation is reported as an event.
pub fn watch<P: AsRef<Path>>(
	filepath: P,
	sender: Sender<WatcherEvent>,
	kind: &WatcherType,
) -> Result<(), String> {
	match kind {
		WatcherType::Poll => {
			poll::PollWatcher::new(Duration::from_millis(250)).run(filepath, sender)
		}
		WatcherType::Notify => notify::NotifyWatcher::new().run(filepath, sender),
	}
}
