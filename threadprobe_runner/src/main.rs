mod cli;
mod run;
mod runner;
mod util;
mod watcher;

#[cfg(test)]
mod test;

use std::process;

use cli::Cli;
use log::error;

fn main() {
	env_logger::init();

	let cli = Cli::parse();

	let lib_path = cli.library_path().unwrap_or_else(|e| {
		error!("{}", e);
		error!("Unable to resolve file path. Aborting");
		process::exit(1);
	});

	run::start(lib_path, cli);
}
