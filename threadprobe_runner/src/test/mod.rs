
use std::{fs, io, sync::Once};

use harness::Session;

static INIT: Once = Once::new();

fn setup() {
	INIT.call_once(|| {
		env_logger::init();
	});
}

#[tokio::test]
async fn runner_session_end_to_end() -> io::Result<()> {
	setup();

	harness::build(&["threadprobe-module", "threadprobe-runner"]).await?;

	let session = Session::new("end_to_end")?;
	let output = session.run(2, 2).await?;

	let stderr = String::from_utf8_lossy(&output.stderr);
	for line in stderr.lines() {
		println!("{}", line);
	}
	assert!(output.status.success());
	assert!(stderr.contains("Module attach reported success"));
	assert!(stderr.contains("Workers kept logging after detach"));

	let log = fs::read_to_string(session.log_path())?;
	assert!(log.contains("module_attach - begin"));
	assert!(log.contains("module_attach - end"));
	assert!(log.contains("module_detach - begin"));
	assert!(log.contains("module_detach - end"));
	assert_eq!(log.matches("test_entry()").count(), 2);
	assert_eq!(log.matches("counter = 0\n").count(), 3);
	Ok(())
}
