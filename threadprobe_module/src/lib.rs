//! Diagnostic module for verifying that a host process can load a native
//! library and that the library can run background threads and write logs on
//! its own. Every worker is immortal by design: detaching releases handles
//! but never stops a loop.

use std::thread;
use std::time::Duration;

use threadprobe::{
	debug_log, logger, spawner, threadprobe_entry_attach, threadprobe_entry_detach,
	threadprobe_entry_test, LOG_FILENAME,
};

/// Worker body shared by every launch site: a private counter from 0, one
/// log line per second, no exit condition.
fn counting_worker() {
	let mut counter = 0;
	loop {
		debug_log!("counter = {}", counter);
		counter += 1;
		thread::sleep(Duration::from_secs(1));
	}
}

#[threadprobe_entry_attach]
fn attach() -> bool {
	logger::shared().init(LOG_FILENAME);
	debug_log!("module_attach - begin");
	spawner::shared().start(counting_worker);
	debug_log!("module_attach - end");
	true
}

#[threadprobe_entry_detach]
fn detach() {
	debug_log!("module_detach - begin");
	spawner::shared().close_all();
	debug_log!("module_detach - end");
}

#[threadprobe_entry_test]
fn test() {
	debug_log!("test_entry()");
	spawner::shared().start(counting_worker);
}
