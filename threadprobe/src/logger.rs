//! Process-wide append-only debug log.
//!
//! The log is lazily initialized: the first `init` opens (and truncates) the
//! destination, every later call is a no-op. Writes append a formatted line
//! and force it durable before returning. Nothing is ever surfaced to the
//! caller: an open failure leaves the log permanently inactive and write
//! failures are ignored.

use std::{fmt, fs::File, io::Write, path::Path, sync::OnceLock};

/// Upper bound on a single formatted line, in bytes. Longer lines are
/// truncated, not split.
const LINE_CAPACITY: usize = 1024;

pub struct DebugLog {
	target: OnceLock<Option<File>>,
}

impl DebugLog {
	pub const fn new() -> Self {
		Self {
			target: OnceLock::new(),
		}
	}

	/// Opens the destination, truncating any prior content. The first caller
	/// wins, even under concurrent first use; later calls never reopen and
	/// never retry a failed open.
	pub fn init<P: AsRef<Path>>(&self, path: P) {
		self.target.get_or_init(|| File::create(path).ok());
	}

	/// Whether an `init` has run and actually opened the destination.
	pub fn is_active(&self) -> bool {
		matches!(self.target.get(), Some(Some(_)))
	}

	/// Appends one `<source>(<line>) : <message>` line and flushes it to
	/// disk. No-op until a successful `init`. The write itself is not
	/// guarded by a lock, so concurrent lines may interleave at the byte
	/// level; only the underlying write primitive serializes them.
	pub fn write(&self, source: &str, line: u32, args: fmt::Arguments) {
		if let Some(Some(file)) = self.target.get() {
			let mut text = String::with_capacity(LINE_CAPACITY);
			if fmt::write(&mut text, format_args!("{}({}) : {}\n", source, line, args)).is_err() {
				return;
			}
			if text.len() > LINE_CAPACITY {
				let mut end = LINE_CAPACITY;
				while !text.is_char_boundary(end) {
					end -= 1;
				}
				text.truncate(end);
			}

			let mut target = file;
			let _ = target.write_all(text.as_bytes());
			let _ = file.sync_data();
		}
	}
}

static SHARED: DebugLog = DebugLog::new();

/// The log shared by every thread of the process. Module entry points and
/// workers all write here.
pub fn shared() -> &'static DebugLog {
	&SHARED
}

/// Appends one line to the process-wide log, prefixed with the call site.
#[macro_export]
macro_rules! debug_log {
	($($arg:tt)*) => {
		$crate::logger::shared().write(file!(), line!(), format_args!($($arg)*))
	};
}

#[cfg(test)]
mod tests {
	use std::{env, fs, path::PathBuf, process, sync::Arc, thread};

	use super::DebugLog;

	fn temp_path(name: &str) -> PathBuf {
		let dir = env::temp_dir().join("threadprobe-logger-tests");
		let _ = fs::create_dir_all(&dir);
		dir.join(format!("{}-{}.txt", name, process::id()))
	}

	#[test]
	fn init_truncates_and_later_calls_are_noops() {
		let first = temp_path("first");
		let second = temp_path("second");
		let _ = fs::remove_file(&second);
		fs::write(&first, "stale content").unwrap();

		let log = DebugLog::new();
		log.init(&first);
		assert!(log.is_active());
		assert_eq!(fs::metadata(&first).unwrap().len(), 0);

		log.init(&second);
		assert!(!second.exists());

		log.write("probe.rs", 7, format_args!("counter = {}", 0));
		assert_eq!(
			fs::read_to_string(&first).unwrap(),
			"probe.rs(7) : counter = 0\n"
		);
	}

	#[test]
	fn concurrent_init_opens_exactly_one_destination() {
		let paths: Vec<_> = (0..8)
			.map(|index| temp_path(&format!("race-{}", index)))
			.collect();
		for path in &paths {
			let _ = fs::remove_file(path);
		}

		let log = Arc::new(DebugLog::new());
		let threads: Vec<_> = paths
			.iter()
			.map(|path| {
				let log = log.clone();
				let path = path.clone();
				thread::spawn(move || log.init(path))
			})
			.collect();
		for handle in threads {
			handle.join().unwrap();
		}

		assert!(log.is_active());
		let opened = paths.iter().filter(|path| path.exists()).count();
		assert_eq!(opened, 1);
	}

	#[test]
	fn open_failure_degrades_to_noop() {
		let log = DebugLog::new();
		log.init(env::temp_dir());
		assert!(!log.is_active());
		log.write("probe.rs", 1, format_args!("never written"));
	}

	#[test]
	fn write_before_init_is_noop() {
		let log = DebugLog::new();
		log.write("probe.rs", 1, format_args!("never written"));
		assert!(!log.is_active());
	}

	#[test]
	fn long_lines_are_truncated() {
		let path = temp_path("truncate");
		let log = DebugLog::new();
		log.init(&path);

		let oversized = "x".repeat(2000);
		log.write("probe.rs", 1, format_args!("{}", oversized));
		assert_eq!(fs::metadata(&path).unwrap().len(), super::LINE_CAPACITY as u64);
	}

	#[test]
	fn writes_from_multiple_threads_all_land() {
		let path = temp_path("threads");
		let log = Arc::new(DebugLog::new());
		log.init(&path);

		let threads: Vec<_> = (0..4)
			.map(|tag| {
				let log = log.clone();
				thread::spawn(move || {
					for line in 0..10 {
						log.write("probe.rs", line, format_args!("thread {} line {}", tag, line));
					}
				})
			})
			.collect();
		for handle in threads {
			handle.join().unwrap();
		}

		let content = fs::read_to_string(&path).unwrap();
		assert_eq!(content.lines().count(), 40);
		for tag in 0..4 {
			let marker = format!("thread {} ", tag);
			assert_eq!(content.matches(&marker).count(), 10);
		}
	}
}
