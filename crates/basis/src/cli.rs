use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(name = "basis", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Registry file, either `.reg` triples or a `.toml` manifest
    #[arg(long, global = true, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Namespace short names are expanded in
    #[arg(long, global = true, value_name = "NS")]
    pub namespace: Option<String>,

    /// Echo command lines and raise logging to debug
    #[arg(short, long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the target UID a name refers to
    #[command(name = "targetuid")]
    TargetUid { name: String },
    /// Exit 0 if the name refers to a registered target, 1 otherwise
    #[command(name = "istarget")]
    IsTarget { name: String },
    /// Print the absolute path of a target or command
    #[command(name = "exepath")]
    ExePath { name: Option<String> },
    /// Print the file name of a target or command
    #[command(name = "exename")]
    ExeName { name: Option<String> },
    /// Print the directory of a target or command
    #[command(name = "exedir")]
    ExeDir { name: Option<String> },
    /// Run one command and wait for it
    #[command(alias = "x", name = "execute")]
    Execute(ExecuteArg),
    /// Join arguments into one quoted line
    #[command(name = "quote")]
    Quote {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Split a quoted line, one argument per output line
    #[command(name = "split")]
    Split {
        #[arg(allow_hyphen_values = true)]
        line: String,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ExecuteArg {
    /// Exit with the command's status instead of failing on non-zero
    #[arg(long)]
    pub allow_fail: bool,

    /// Print the command line without running it
    #[arg(short = 'n', long)]
    pub simulate: bool,

    /// Discard the command's output
    #[arg(short, long)]
    pub quiet: bool,

    /// Target or command, followed by its arguments
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true, value_name = "CMD")]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_app_definition() {
        App::command().debug_assert();
    }

    #[test]
    fn test_execute_keeps_child_flags() {
        let app = App::parse_from(["basis", "-v", "execute", "--allow-fail", "sh", "-c", "exit 2"]);
        assert_eq!(app.verbose, 1);
        let Commands::Execute(arg) = app.cmd else {
            panic!("expected execute");
        };
        assert!(arg.allow_fail);
        assert!(!arg.simulate);
        assert_eq!(arg.command, ["sh", "-c", "exit 2"]);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let app = App::parse_from([
            "basis",
            "targetuid",
            "tool",
            "--namespace",
            "proj.sub",
            "--registry",
            "share/targets.toml",
        ]);
        assert_eq!(app.namespace.as_deref(), Some("proj.sub"));
        assert_eq!(app.registry, Some(PathBuf::from("share/targets.toml")));
        assert!(matches!(app.cmd, Commands::TargetUid { name } if name == "tool"));
    }

    #[test]
    fn test_exepath_name_is_optional() {
        let app = App::parse_from(["basis", "exepath"]);
        assert!(matches!(app.cmd, Commands::ExePath { name: None }));
    }

    #[test]
    fn test_quote_accepts_empty_and_hyphen_args() {
        let app = App::parse_from(["basis", "quote", "a b", "", "-x"]);
        assert!(matches!(app.cmd, Commands::Quote { args } if args == ["a b", "", "-x"]));
    }

    #[test]
    fn test_execute_requires_command() {
        assert!(App::try_parse_from(["basis", "execute", "--simulate"]).is_err());
    }
}
