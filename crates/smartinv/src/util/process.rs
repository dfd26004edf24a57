use crate::error::{Result, SmartinvError};
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
    pub timed_out: bool,
}

/// Runs `cmd` to completion, capturing both output streams.
///
/// With a timeout the child is killed once the deadline passes and the
/// returned output has `timed_out` set and empty streams. Pipe readers are
/// detached rather than joined in that case, since a grandchild of a wrapper
/// script can hold the pipes open after the child is gone. Failure to spawn
/// is reported as an `ExternalTool` error naming `tool`.
pub fn run_command(
    tool: &str,
    mut cmd: Command,
    stdin: Option<&str>,
    timeout: Option<Duration>,
) -> Result<CommandOutput> {
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    log::debug!("Executing {}: {:?}", tool, cmd);

    let mut child = cmd.spawn().map_err(|e| SmartinvError::ExternalTool {
        tool: tool.to_string(),
        message: format!("Failed to execute {}: {}", tool, e),
    })?;

    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        if let Err(e) = pipe.write_all(input.as_bytes()) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SmartinvError::ExternalTool {
                tool: tool.to_string(),
                message: format!("Failed to write to {} stdin: {}", tool, e),
            });
        }
    }

    let (status, timed_out) = wait_for(&mut child, timeout)?;

    if timed_out {
        log::debug!("{} timed out, detaching output readers", tool);
        return Ok(CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: -1,
            success: false,
            timed_out: true,
        });
    }

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code: status.and_then(|s| s.code()).unwrap_or(-1),
        success: status.map(|s| s.success()).unwrap_or(false),
        timed_out,
    })
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).to_string()
    })
}

fn wait_for(
    child: &mut Child,
    timeout: Option<Duration>,
) -> Result<(Option<std::process::ExitStatus>, bool)> {
    let Some(timeout) = timeout else {
        return Ok((Some(child.wait()?), false));
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((Some(status), false));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok((None, true));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
