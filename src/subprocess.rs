use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::BenchmarkError;

/// Upper bound on a single external command. Generous on purpose: no real
/// compressor comes close on benchmark-sized inputs, but a wedged tool must
/// not hang the whole run.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(600);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Executes a third party tool.
///
/// The argument list is joined into a single line and run through `sh -c`,
/// since tool command lines use shell redirection to write their output.
/// stdout is discarded; stderr is captured and attached to the error on a
/// non-zero exit.
pub fn exec(args: &[String], timeout: Duration) -> Result<(), BenchmarkError> {
    let cmd_str = args.join(" ");

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(&cmd_str)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain stderr on a separate thread so a chatty tool cannot fill the
    // pipe and block before we observe its exit.
    let mut stderr_pipe = child.stderr.take().expect("stderr was piped");
    let stderr_reader = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stderr_pipe.read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(BenchmarkError::CommandTimedOut { command: cmd_str, timeout });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stderr_bytes = stderr_reader.join().unwrap_or_default();

    if !status.success() {
        return Err(BenchmarkError::CommandFailed {
            command: cmd_str,
            stderr: String::from_utf8_lossy(&stderr_bytes).trim().to_string(),
        });
    }

    Ok(())
}
