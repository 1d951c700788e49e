//! Running external programs.
//!
//! Everything this plugin knows about VMs, containers and images comes from
//! the standard output of `limactl` and `lima nerdctl`. A non-zero exit
//! status is not an error here: the status and standard error are logged and
//! whatever reached standard output is handed back. Only failing to start the
//! program at all is reported as an [`Error`].

mod error;

use std::process::Stdio;

use serde_json::Value;
use snafu::{OptionExt, ResultExt};

pub use self::error::Error;
use crate::environment::Environment;

pub trait CommandRunner {
    /// Runs `command` with exactly the variables in `env` and returns its
    /// standard output.
    async fn run_command(&self, command: &[String], env: &Environment) -> Result<String, Error>;

    /// Runs `command` and decodes every output line as a JSON value.
    ///
    /// Lines that are not valid JSON are logged and skipped.
    async fn json_command(
        &self,
        command: &[String],
        env: &Environment,
    ) -> Result<Vec<Value>, Error> {
        let output = self.run_command(command, env).await?;
        Ok(decode_json_lines(&output))
    }
}

/// Runs commands as child processes on the local machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    async fn run_command(&self, command: &[String], env: &Environment) -> Result<String, Error> {
        let (program, args) = command.split_first().context(error::EmptyCommandSnafu)?;
        let command_line = display_command(command);
        tracing::debug!("Running `{command_line}`");

        let output = tokio::process::Command::new(program)
            .args(args)
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|_| error::SpawnCommandSnafu { command: command_line.clone() })?;

        if !output.status.success() {
            tracing::warn!(
                "`{command_line}` exited with {}, stderr: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Decodes line-delimited JSON, skipping blank and undecodable lines.
pub fn decode_json_lines(output: &str) -> Vec<Value> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("Skipping output line that is not JSON: {line}, error: {err}");
                None
            }
        })
        .collect()
}

/// Renders a command line the way a shell user would type it.
pub fn display_command(command: &[String]) -> String {
    command
        .iter()
        .map(|arg| shell_escape::escape(arg.as_str().into()))
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{testing::ScriptedRunner, *};

    #[test]
    fn test_invalid_line_does_not_stop_decoding() {
        let output = "{\"name\":\"a\"}\nWARN[0000] not json\n\n{\"name\":\"b\"}\n";

        let values = decode_json_lines(output);

        assert_eq!(values, vec![json!({"name": "a"}), json!({"name": "b"})]);
    }

    #[test]
    fn test_display_command_quotes_arguments() {
        let command = ["lima", "sh", "-c", "ls -la"].map(String::from);

        assert_eq!(display_command(&command), "lima sh -c 'ls -la'");
    }

    #[tokio::test]
    async fn test_json_command_uses_run_command_output() {
        let runner = ScriptedRunner::default()
            .with_output(&["limactl", "list", "--json"], "{\"name\":\"default\"}\n{oops\n");
        let command = ["limactl", "list", "--json"].map(String::from);

        let values = runner.json_command(&command, &Environment::default()).await.unwrap();

        assert_eq!(values, vec![json!({"name": "default"})]);
        assert_eq!(runner.calls(), vec![command.to_vec()]);
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let err = SystemCommandRunner.run_command(&[], &Environment::default()).await.unwrap_err();

        assert!(matches!(err, Error::EmptyCommand));
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_spawn() {
        let command = vec!["limabar-test-no-such-program".to_string()];

        let err =
            SystemCommandRunner.run_command(&command, &Environment::default()).await.unwrap_err();

        assert!(matches!(err, Error::SpawnCommand { .. }));
    }

    #[tokio::test]
    async fn test_failing_command_still_returns_stdout_with_only_given_env() {
        let command = ["/bin/sh", "-c", "echo \"$LIMABAR_TEST_VAR:$HOME\"; echo oops >&2; exit 3"]
            .map(String::from);
        let mut env = Environment::default();
        env.set("PATH", "/usr/bin:/bin");
        env.set("LIMABAR_TEST_VAR", "x");

        let output = SystemCommandRunner.run_command(&command, &env).await.unwrap();

        assert_eq!(output, "x:\n");
    }
}
