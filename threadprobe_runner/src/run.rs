use std::{
	env, fs,
	path::{Path, PathBuf},
	process,
	sync::mpsc::{self, Receiver, RecvTimeoutError},
	thread,
	time::{Duration, Instant},
};

use log::{debug, error, info, warn};
use threadprobe_ffi::{API_VERSION, LOG_FILENAME};

use crate::{
	cli::Cli,
	runner::ProbeLib,
	watcher::{self, WatcherEvent},
};

fn log_file_len<P: AsRef<Path>>(path: P) -> u64 {
	fs::metadata(path).map(|metadata| metadata.len()).unwrap_or(0)
}

/// Drains watcher events for `window`, returning how many change events
/// arrived.
fn observe(receiver: &Receiver<WatcherEvent>, window: Duration) -> usize {
	let deadline = Instant::now() + window;
	let mut changes = 0;
	loop {
		let now = Instant::now();
		if now >= deadline {
			break;
		}
		match receiver.recv_timeout(deadline - now) {
			Ok(WatcherEvent::Created) => info!("Log file appeared"),
			Ok(WatcherEvent::Changed) => changes += 1,
			Ok(WatcherEvent::Destroyed) => warn!("Log file was removed"),
			Err(RecvTimeoutError::Timeout) => break,
			Err(RecvTimeoutError::Disconnected) => {
				error!("Watcher disconnected");
				break;
			}
		}
	}
	changes
}

pub fn start(lib_path: PathBuf, cli: Cli) {
	let current_dir = match env::current_dir() {
		Ok(dir) => dir,
		Err(e) => {
			error!("Unable to get working directory: {}", e);
			process::exit(1);
		}
	};
	let log_path = current_dir.join(LOG_FILENAME);

	let (watcher_sender, watcher_receiver) = mpsc::channel();
	if let Err(e) = watcher::watch(&log_path, watcher_sender, &cli.watcher) {
		error!("{}", e);
		process::exit(1);
	}

	let lib = match ProbeLib::load(&lib_path) {
		Ok(lib) => {
			info!("Successfully loaded library");
			lib
		}
		Err(e) => {
			error!("{}", e);
			process::exit(1);
		}
	};
	let symbols = match lib.symbols() {
		Ok(symbols) => symbols,
		Err(e) => {
			error!("{}", e);
			process::exit(1);
		}
	};

	let version = symbols.version();
	if version != API_VERSION {
		error!(
			"Module reports probe API version {}, expected {}. Aborting",
			version, API_VERSION
		);
		process::exit(1);
	}
	debug!("Module probe API version: {}", version);

	if symbols.attach() {
		info!("Module attach reported success");
	} else {
		warn!("Module attach reported failure. Continuing");
	}

	for call in 0..cli.calls {
		thread::sleep(Duration::from_secs(1));
		debug!("Requesting extra worker {} of {}", call + 1, cli.calls);
		symbols.test();
	}

	let window = Duration::from_secs(cli.observe);

	let before = log_file_len(&log_path);
	let changes = observe(&watcher_receiver, window);
	let after = log_file_len(&log_path);
	info!(
		"Workers running: {} change events, log size {} -> {} bytes",
		changes, before, after
	);

	symbols.detach();
	info!("Module detach completed");

	let before = log_file_len(&log_path);
	let changes = observe(&watcher_receiver, window);
	let after = log_file_len(&log_path);
	if after > before {
		info!(
			"Workers kept logging after detach: {} change events, log size {} -> {} bytes",
			changes, before, after
		);
	} else {
		warn!("No log growth after detach");
	}

	drop(symbols);
	lib.leak();
}
