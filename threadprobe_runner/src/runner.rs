use std::path::Path;

use libloading::{Library, Symbol};

fn load_symbol<'a, T: 'a>(lib: &'a Library, name: &'static str) -> Result<Symbol<'a, T>, String> {
	unsafe {
		let func: Result<Symbol<T>, _> = lib.get(name.as_bytes());
		func
	}
	.map_err(|_err| format!("Error loading symbol `{}`", name))
}

/// The entry points resolved from a loaded module.
pub struct ProbeSymbols<'a> {
	version: Symbol<'a, unsafe extern "C" fn() -> u32>,
	attach: Symbol<'a, unsafe extern "C" fn() -> bool>,
	detach: Symbol<'a, unsafe extern "C" fn()>,
	test: Symbol<'a, unsafe extern "C" fn()>,
}

impl<'a> ProbeSymbols<'a> {
	fn from(lib: &'a Library) -> Result<Self, String> {
		Ok(Self {
			version: load_symbol(lib, threadprobe_ffi::ENTRY_VERSION)?,
			attach: load_symbol(lib, threadprobe_ffi::ENTRY_ATTACH)?,
			detach: load_symbol(lib, threadprobe_ffi::ENTRY_DETACH)?,
			test: load_symbol(lib, threadprobe_ffi::ENTRY_TEST)?,
		})
	}

	pub fn version(&self) -> u32 {
		unsafe { (self.version)() }
	}

	pub fn attach(&self) -> bool {
		unsafe { (self.attach)() }
	}

	pub fn detach(&self) {
		unsafe { (self.detach)() }
	}

	pub fn test(&self) {
		unsafe { (self.test)() }
	}
}

pub struct ProbeLib {
	lib: Library,
}

impl ProbeLib {
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
		Library::new(path.as_ref().as_os_str())
			.map(|lib| Self { lib })
			.map_err(|_err| format!("Error loading library `{}`", path.as_ref().display()))
	}

	pub fn symbols(&self) -> Result<ProbeSymbols<'_>, String> {
		ProbeSymbols::from(&self.lib)
	}

	/// Leaks the library so it stays mapped for the life of the process.
	/// Workers started by the module keep executing its code after the
	/// session ends; unmapping would pull that code out from under them.
	pub fn leak(self) {
		std::mem::forget(self.lib);
	}
}
