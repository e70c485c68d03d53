use crate::error::{Error, Result};
use crate::options::ExecOptions;
use basis_platform::command::{Command, exit_code};
use basis_platform::quote;
use basis_target::Context;
use tracing::{debug, info, warn};

/// Run `command` once with `args` and wait for it.
///
/// `command` is resolved through [`Context::exe_path`], so it may be a target
/// name or a plain command on the search path. Returns the child's exit
/// status. A non-zero status is an [`Error::SubprocessFailure`] unless
/// [`ExecOptions::allow_fail`] is set. In simulate mode nothing is spawned
/// and the status is `0`.
pub fn execute<S: AsRef<str>>(
    ctx: &Context,
    options: &ExecOptions,
    command: &str,
    args: &[S],
) -> Result<i32> {
    let Some(mut cmd) = prepare(ctx, options, command, args)? else {
        return Ok(0);
    };
    let status = exit_code(cmd.status()?);
    check(options, &cmd, status)
}

/// [`execute`] with the command and its arguments given as one quoted line.
pub fn execute_line(ctx: &Context, options: &ExecOptions, line: &str) -> Result<i32> {
    let mut parts = quote::split_quoted(line);
    if parts.is_empty() {
        return Err(Error::MissingArgument("command"));
    }
    let command = parts.remove(0);
    execute(ctx, options, &command, &parts)
}

/// [`execute`], additionally collecting the child's standard output.
///
/// Standard error is not captured.
pub fn execute_capture<S: AsRef<str>>(
    ctx: &Context,
    options: &ExecOptions,
    command: &str,
    args: &[S],
) -> Result<(i32, String)> {
    let Some(mut cmd) = prepare(ctx, options, command, args)? else {
        return Ok((0, String::new()));
    };
    let output = cmd.capture_stdout()?;
    let status = check(options, &cmd, exit_code(output.status))?;
    Ok((status, String::from_utf8_lossy(&output.stdout).into_owned()))
}

/// The line [`execute`] echoes for this invocation: resolved path and
/// arguments, quoted so that splitting it reproduces the call.
pub fn command_line<S: AsRef<str>>(ctx: &Context, command: &str, args: &[S]) -> Result<String> {
    Ok(build(ctx, command, args)?.command_line())
}

fn build<S: AsRef<str>>(ctx: &Context, command: &str, args: &[S]) -> Result<Command> {
    if command.is_empty() {
        return Err(Error::MissingArgument("command"));
    }
    let path = ctx.exe_path(Some(command))?;
    Ok(Command::new(path).args(args.iter().map(|a| a.as_ref().to_owned())))
}

fn prepare<S: AsRef<str>>(
    ctx: &Context,
    options: &ExecOptions,
    command: &str,
    args: &[S],
) -> Result<Option<Command>> {
    let mut cmd = build(ctx, command, args)?;
    if options.get_quiet() {
        cmd = cmd.quiet();
    }

    let cmdline = cmd.command_line();
    if options.echoes() {
        println!("{cmdline}");
    }
    if options.get_simulate() {
        debug!(cmd = %cmdline, "simulate: not spawning");
        return Ok(None);
    }

    info!(cmd = %cmdline, "executing command");
    Ok(Some(cmd))
}

fn check(options: &ExecOptions, cmd: &Command, status: i32) -> Result<i32> {
    if status == 0 {
        return Ok(0);
    }
    let cmdline = cmd.command_line();
    if !options.get_allow_fail() {
        return Err(Error::SubprocessFailure { cmdline, status });
    }
    warn!(cmd = %cmdline, status, "command failed, continuing");
    Ok(status)
}
