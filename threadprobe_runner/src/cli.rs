use std::{
	path::{Path, PathBuf},
	str::FromStr,
};

use clap::Parser;

use crate::util::cargo;

fn path_validator(input: &str) -> Result<(), String> {
	let path: &Path = input.as_ref();
	if !path.exists() {
		return Err(format!("File `{}` does not exist.", input));
	}
	Ok(())
}

#[derive(Parser)]
#[clap(version = "0.1")]
pub struct Cli {
	/// The directory of the module's Cargo project or file if using --file.
	#[clap(validator = path_validator)]
	pub input: String,

	/// Expects a library file as opposed to Cargo project as input
	#[clap(short, long)]
	pub file: bool,

	/// The Cargo profile to locate the built module under (when not using --file)
	#[clap(long, default_value = "debug", conflicts_with = "file")]
	pub profile: String,

	/// How many extra workers to request through the module's test entry point
	#[clap(long, default_value = "2")]
	pub calls: u32,

	/// How long to watch the log file between phases, in seconds
	#[clap(long, default_value = "3")]
	pub observe: u64,

	/// The log file watcher type.
	#[clap(long, default_value = "poll")]
	pub watcher: WatcherType,
}

pub enum WatcherType {
	Poll,
	Notify,
}

impl FromStr for WatcherType {
	type Err = &'static str;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"poll" => Ok(WatcherType::Poll),
			"notify" => Ok(WatcherType::Notify),
			_ => Err("no match"),
		}
	}
}

impl Cli {
	pub fn parse() -> Self {
		Parser::parse()
	}

	pub fn library_path(&self) -> Result<PathBuf, String> {
		let path: &Path = self.input.as_ref();
		if !self.file {
			if path.is_dir() {
				cargo::module_lib_path(path, &self.profile)
			} else {
				Err(format!(
					"Must be a Cargo project directory `{}`",
					path.display()
				))
			}
		} else {
			if path.is_file() {
				Ok(path.to_owned())
			} else {
				Err(format!("Must be a library file `{}`", path.display()))
			}
		}
	}
}
