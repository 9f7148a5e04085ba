use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;

/// Lines of stderr kept for the failure message
const STDERR_TAIL: usize = 20;

/// Execute a command in the project directory and wait for it to finish.
///
/// Output is echoed in verbose mode. A non-zero exit status is an error
/// carrying the last lines the command wrote to stderr.
pub fn execute(ctx: &Context, program: &str, args: &[String]) -> Result<()> {
    let display = command_line(program, args);
    if ctx.verbose {
        cliclack::log::step(format!("Executing: {}", display))?;
    }

    let mut child = Command::new(program)
        .args(args)
        .current_dir(&ctx.base_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::CommandFailed(format!("failed to run {}: {}", display, e)))?;

    // Drain stderr on its own thread so neither pipe can fill up and block the child
    let verbose = ctx.verbose;
    let stderr_reader = child.stderr.take().map(|stderr| {
        thread::spawn(move || {
            let mut tail = VecDeque::with_capacity(STDERR_TAIL);
            let drained = for_each_line(stderr, |line| {
                if verbose {
                    eprintln!("{}", line);
                }
                if tail.len() == STDERR_TAIL {
                    tail.pop_front();
                }
                tail.push_back(line);
            });
            (tail, drained)
        })
    });

    let stdout_drained = match child.stdout.take() {
        Some(stdout) => for_each_line(stdout, |line| {
            if verbose {
                println!("{}", line);
            }
        }),
        None => Ok(()),
    };

    let status = child.wait()?;
    stdout_drained?;
    let tail = match stderr_reader.map(|handle| handle.join()) {
        Some(Ok((tail, drained))) => {
            drained?;
            tail
        }
        Some(Err(_)) => return Err(Error::custom("stderr reader thread panicked")),
        None => VecDeque::new(),
    };

    if !status.success() {
        let code = status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        let mut message = format!("{} failed with exit code: {}", display, code);
        if !tail.is_empty() && !verbose {
            message.push('\n');
            message.push_str(&Vec::from(tail).join("\n"));
        }
        return Err(Error::CommandFailed(message));
    }

    Ok(())
}

/// Read `reader` to EOF, handing each line to `f` with invalid UTF-8
/// replaced. Only a real I/O error stops the loop early.
fn for_each_line<R: Read>(reader: R, mut f: impl FnMut(String)) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return Ok(()),
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                f(line.trim_end_matches(['\n', '\r']).to_string());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
