use std::process::Command;

#[test]
fn test_binary_exits_cleanly_and_silently() {
  let output = Command::new(env!("CARGO_BIN_EXE_rsegments"))
    .env_remove("RUST_LOG")
    .output()
    .expect("failed to run rsegments");

  assert_eq!(output.status.code(), Some(0));
  assert!(output.stdout.is_empty());
  assert!(output.stderr.is_empty());
}

#[test]
fn test_debug_logging_shows_all_three_buffers() {
  let output = Command::new(env!("CARGO_BIN_EXE_rsegments"))
    .env("RUST_LOG", "rsegments=debug")
    .output()
    .expect("failed to run rsegments");

  assert!(output.status.success());

  let log = String::from_utf8_lossy(&output.stderr);
  assert!(log.contains("[data]"));
  assert!(log.contains("\"THIS IS ON THE DATA SEGMENT\""));
  assert!(log.contains("[stack]"));
  assert!(log.contains("\"THIS IS ON THE STACK\""));
  assert!(log.contains("[heap]"));
  assert!(log.contains("\"THIS IS ON THE HEAP\""));
}
