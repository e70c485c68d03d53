use crate::error::{Error, Result};
use crate::quote;
use std::path::PathBuf;
use std::process::{Command as StdCommand, ExitStatus, Output, Stdio};

/// A child process invocation that keeps the pieces needed to print itself.
#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: PathBuf,
    args: Vec<String>,
}

impl Command {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        Self {
            inner: StdCommand::new(&program),
            program,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        let arg = arg.into();
        self.inner.arg(&arg);
        self.args.push(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    /// Discard the child's standard output and error.
    pub fn quiet(mut self) -> Self {
        self.inner.stdout(Stdio::null()).stderr(Stdio::null());
        self
    }

    /// The invocation as one string that [`quote::split_quoted`] splits back
    /// into program and arguments.
    pub fn command_line(&self) -> String {
        let program = self.program.to_string_lossy();
        quote::to_string(
            std::iter::once(program.as_ref()).chain(self.args.iter().map(String::as_str)),
        )
    }

    /// Run to completion with the caller's standard streams.
    pub fn status(&mut self) -> Result<ExitStatus> {
        self.inner.status().map_err(|e| Error::CommandFailed {
            cmd: self.command_line(),
            source: e,
        })
    }

    /// Run to completion, collecting standard output. Standard error stays
    /// attached to the caller unless [`Command::quiet`] was set.
    pub fn capture_stdout(&mut self) -> Result<Output> {
        self.inner.stdout(Stdio::piped());
        self.inner.output().map_err(|e| Error::CommandFailed {
            cmd: self.command_line(),
            source: e,
        })
    }
}

/// Numeric exit status of a finished child.
///
/// On Unix a child terminated by a signal reports `128 + signal`. Elsewhere a
/// missing code is `-1`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_new() {
        let cmd = Command::new("echo");
        assert_eq!(cmd.inner.get_program(), "echo");
        assert_eq!(cmd.command_line(), "echo");
    }

    #[test]
    fn test_command_args_reach_inner() {
        let cmd = Command::new("echo").arg("a").args(["b", "c"]);
        let inner: Vec<_> = cmd.inner.get_args().collect();
        assert_eq!(inner, ["a", "b", "c"]);
        assert_eq!(cmd.args, ["a", "b", "c"]);
    }

    #[test]
    fn test_command_line_quotes_args() {
        let cmd = Command::new("/opt/my tools/run").args(["hello world", "", "x"]);
        assert_eq!(cmd.command_line(), r#""/opt/my tools/run" "hello world" "" x"#);
    }

    #[test]
    fn test_command_line_round_trips() {
        let cmd = Command::new("/bin/tool").args(["say \"hi\"", "plain"]);
        assert_eq!(
            quote::split_quoted(&cmd.command_line()),
            ["/bin/tool", "say \"hi\"", "plain"]
        );
    }

    #[test]
    fn test_missing_program_reports_command_line() {
        let mut cmd = Command::new("/nonexistent/basis/tool").arg("x");
        let err = cmd.status().unwrap_err();
        match err {
            Error::CommandFailed { cmd, .. } => assert_eq!(cmd, "/nonexistent/basis/tool x"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_status_and_exit_code() {
        let mut cmd = Command::new("sh").args(["-c", "exit 3"]);
        let status = cmd.status().unwrap();
        assert_eq!(exit_code(status), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_exit_code() {
        let mut cmd = Command::new("sh").args(["-c", "kill -9 $$"]);
        let status = cmd.status().unwrap();
        assert_eq!(exit_code(status), 128 + 9);
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_stdout() {
        let mut cmd = Command::new("sh").args(["-c", "echo captured"]);
        let output = cmd.capture_stdout().unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "captured");
    }
}
