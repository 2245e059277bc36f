use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::util::platform;

#[derive(Deserialize)]
struct Config {
	package: Option<Package>,
	lib: Option<Lib>,
}

#[derive(Deserialize)]
struct Package {
	name: Option<String>,
}

#[derive(Deserialize)]
struct Lib {
	name: Option<String>,
}

pub fn manifest_path<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
	let path = dir.as_ref().join("Cargo.toml");
	if path.is_file() {
		Some(path)
	} else {
		None
	}
}

/// The file-system name of the library a module project builds: its `[lib]`
/// name if set, otherwise the package name normalized the way Cargo does.
pub fn module_lib_name<P: AsRef<Path>>(manifest: P) -> Result<String, String> {
	let content = fs::read_to_string(&manifest).map_err(|_| {
		format!(
			"Unable to read Cargo.toml file `{}`",
			manifest.as_ref().display()
		)
	})?;
	let config: Config = toml::from_str(&content).map_err(|_| {
		format!(
			"Unable to parse Cargo.toml file `{}`",
			manifest.as_ref().display()
		)
	})?;

	let Config { package, lib } = config;
	lib
		.and_then(|lib| lib.name)
		.or_else(|| {
			package
				.and_then(|package| package.name)
				.map(|name| name.replace('-', "_"))
		})
		.ok_or_else(|| {
			format!(
				"Unable to find a library name in `{}`",
				manifest.as_ref().display()
			)
		})
}

/// The target directory serving a project: its own `target` if present,
/// otherwise the surrounding workspace's.
pub fn target_directory<P: AsRef<Path>>(dir: P) -> Result<PathBuf, String> {
	let local = dir.as_ref().join("target");
	if local.is_dir() {
		return Ok(local);
	}

	let parent = dir
		.as_ref()
		.parent()
		.ok_or_else(|| format!("Unable to find parent path of `{}`", dir.as_ref().display()))?;
	if manifest_path(parent).is_none() {
		return Err(format!("Invalid Cargo path in `{}`", parent.display()));
	}
	let workspace = parent.join("target");
	if workspace.is_dir() {
		Ok(workspace)
	} else {
		Err(format!("Invalid target location in `{}`", parent.display()))
	}
}

/// Where a module project's built library lands for the given profile.
pub fn module_lib_path<P: AsRef<Path>>(dir: P, profile: &str) -> Result<PathBuf, String> {
	let manifest = manifest_path(&dir).ok_or_else(|| {
		format!(
			"Unable to get lib path of non-Cargo project directory `{}`",
			dir.as_ref().display()
		)
	})?;
	let lib_name = module_lib_name(&manifest)?;
	let filename = platform::library_filename(&lib_name);
	Ok(target_directory(&dir)?.join(profile).join(filename))
}
