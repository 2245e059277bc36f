//! Launches unmanaged background workers and tracks their handles.
//!
//! Workers are independent OS threads with no scheduler, no work queue and no
//! cancellation mechanism. The registry exists solely so their handles can be
//! released at teardown; releasing a handle does not stop the worker, which
//! keeps running until the process itself dies.

use std::{
	sync::Mutex,
	thread::{self, JoinHandle, Thread},
};

pub struct WorkerRegistry {
	handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerRegistry {
	pub const fn new() -> Self {
		Self {
			handles: Mutex::new(Vec::new()),
		}
	}

	/// Starts a worker that invokes `work` exactly once and records its
	/// handle. The body is moved into the new thread; a body that loops
	/// forever keeps its thread alive for the life of the process, since
	/// nothing ever joins or signals it. Spawn failure is swallowed: nothing
	/// is recorded and `None` is returned.
	pub fn start<F>(&self, work: F) -> Option<Thread>
	where
		F: FnOnce() + Send + 'static,
	{
		let spawned = thread::Builder::new()
			.name("threadprobe-worker".to_string())
			.spawn(move || work());
		if let Ok(handle) = spawned {
			let thread = handle.thread().clone();
			let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
			handles.push(handle);
			Some(thread)
		} else {
			None
		}
	}

	/// Number of workers started and not yet released.
	pub fn count(&self) -> usize {
		self.handles.lock().unwrap_or_else(|e| e.into_inner()).len()
	}

	/// Releases every recorded handle without joining, signalling or
	/// interrupting the workers. Any worker still inside its loop keeps
	/// running and keeps logging after this returns. Returns how many
	/// handles were released.
	pub fn close_all(&self) -> usize {
		let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
		let released = handles.len();
		for handle in handles.drain(..) {
			drop(handle);
		}
		released
	}
}

static SHARED: WorkerRegistry = WorkerRegistry::new();

/// The registry shared by the module's entry points.
pub fn shared() -> &'static WorkerRegistry {
	&SHARED
}

#[cfg(test)]
mod tests {
	use std::{
		env,
		sync::{
			atomic::{AtomicUsize, Ordering},
			Arc,
		},
		thread,
		time::{Duration, Instant},
	};

	use super::WorkerRegistry;
	use crate::logger::DebugLog;

	fn wait_until(condition: impl Fn() -> bool) {
		let deadline = Instant::now() + Duration::from_secs(5);
		while !condition() {
			assert!(Instant::now() < deadline, "condition not reached in time");
			thread::sleep(Duration::from_millis(5));
		}
	}

	#[test]
	fn start_runs_work_exactly_once() {
		let registry = WorkerRegistry::new();
		let calls = Arc::new(AtomicUsize::new(0));

		let calls_worker = calls.clone();
		let thread = registry.start(move || {
			calls_worker.fetch_add(1, Ordering::SeqCst);
		});
		assert_eq!(thread.unwrap().name(), Some("threadprobe-worker"));

		wait_until(|| calls.load(Ordering::SeqCst) == 1);
		thread::sleep(Duration::from_millis(50));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn every_start_records_a_handle() {
		let registry = WorkerRegistry::new();
		for expected in 1..=3 {
			registry.start(|| {});
			assert_eq!(registry.count(), expected);
		}
	}

	#[test]
	fn close_all_empties_the_registry() {
		let registry = WorkerRegistry::new();
		registry.start(|| {});
		registry.start(|| {});

		assert_eq!(registry.close_all(), 2);
		assert_eq!(registry.count(), 0);
		assert_eq!(registry.close_all(), 0);
	}

	#[test]
	fn close_all_does_not_stop_workers() {
		let registry = WorkerRegistry::new();
		let ticks = Arc::new(AtomicUsize::new(0));

		let ticks_worker = ticks.clone();
		registry.start(move || loop {
			ticks_worker.fetch_add(1, Ordering::SeqCst);
			thread::sleep(Duration::from_millis(10));
		});

		wait_until(|| ticks.load(Ordering::SeqCst) > 0);
		assert_eq!(registry.close_all(), 1);

		let released_at = ticks.load(Ordering::SeqCst);
		wait_until(|| ticks.load(Ordering::SeqCst) > released_at);
	}

	#[test]
	fn workers_run_with_an_inactive_log() {
		let registry = WorkerRegistry::new();
		let log = Arc::new(DebugLog::new());
		// Opening a directory as the destination fails, degrading the log
		// to a no-op without affecting the launcher.
		log.init(env::temp_dir());
		assert!(!log.is_active());

		let ticks = Arc::new(AtomicUsize::new(0));
		let log_worker = log.clone();
		let ticks_worker = ticks.clone();
		registry.start(move || loop {
			let counter = ticks_worker.load(Ordering::SeqCst);
			log_worker.write("probe.rs", 1, format_args!("counter = {}", counter));
			ticks_worker.fetch_add(1, Ordering::SeqCst);
			thread::sleep(Duration::from_millis(10));
		});

		wait_until(|| ticks.load(Ordering::SeqCst) > 2);
		assert_eq!(registry.count(), 1);
	}

	#[test]
	fn registry_is_reusable_after_close_all() {
		let registry = WorkerRegistry::new();
		registry.start(|| {});
		registry.close_all();

		registry.start(|| {});
		assert_eq!(registry.count(), 1);
	}
}
