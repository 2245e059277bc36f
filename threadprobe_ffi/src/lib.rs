//! The contract between a threadprobe module and its host: exported symbol
//! names, the probe API version, and the shared log file name.

/// The version of the probe API described by this crate. A host should refuse
/// to attach a module reporting a different version.
pub const API_VERSION: u32 = 0;

/// Name of the append-only log file a module creates in the host's working
/// directory on first logger use.
pub static LOG_FILENAME: &str = "threadprobe-log.txt";

/// Reports the module's probe API version.
///
/// Signature: `() -> u32`
pub static ENTRY_VERSION: &str = "threadprobe_entry_version";

/// Initializes the module's logger and starts its first worker. Returns a
/// success indicator to the host. There is no failure path that refuses the
/// attach; internal errors are swallowed.
///
/// Signature: `() -> bool`
pub static ENTRY_ATTACH: &str = "threadprobe_entry_attach";

/// Releases every worker handle the module has recorded. This does not stop
/// the workers themselves.
///
/// Signature: `() -> ()`
pub static ENTRY_DETACH: &str = "threadprobe_entry_detach";

/// Starts one additional worker. Callable at arbitrary times after attach;
/// every call permanently adds a worker.
///
/// Signature: `() -> ()`
pub static ENTRY_TEST: &str = "threadprobe_entry_test";
