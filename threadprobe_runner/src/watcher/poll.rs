use std::{fs, path::Path, sync::mpsc::Sender, thread, time::Duration};

use log::debug;

use super::WatcherEvent;

pub struct PollWatcher {
	interval: Duration,
}

impl PollWatcher {
	pub fn new(interval: Duration) -> Self {
		Self { interval }
	}
}

impl super::Watcher for PollWatcher {
	fn run(&self, filepath: impl AsRef<Path>, sender: Sender<WatcherEvent>) -> Result<(), String> {
		let path = filepath.as_ref().to_owned();
		let interval = self.interval;
		let mut last_len = fs::metadata(&path).ok().map(|metadata| metadata.len());
		thread::spawn(move || {
			loop {
				let event = match fs::metadata(&path) {
					Ok(metadata) => {
						let len = metadata.len();
						match last_len {
							Some(previous) if previous != len => {
								last_len = Some(len);
								Some(WatcherEvent::Changed)
							}
							Some(_) => None,
							None => {
								last_len = Some(len);
								Some(WatcherEvent::Created)
							}
						}
					}
					Err(_) => {
						if last_len.take().is_some() {
							Some(WatcherEvent::Destroyed)
						} else {
							None
						}
					}
				};

				if let Some(event) = event {
					debug!("Sending watcher event: {:?}", event);
					if sender.send(event).is_err() {
						// The session is over; nobody is listening anymore.
						break;
					}
				}

				thread::sleep(interval);
			}
		});
		Ok(())
	}
}
