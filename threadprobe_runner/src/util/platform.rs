use std::env;

/// Platform file name for a dynamic library with the given crate name.
pub fn library_filename(name: &str) -> String {
	format!("{}{}{}", env::consts::DLL_PREFIX, name, env::consts::DLL_SUFFIX)
}
