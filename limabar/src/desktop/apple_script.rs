use super::Desktop;
use crate::{
    command::{CommandRunner, Error},
    environment::Environment,
};

/// Talks to the macOS desktop by running `osascript -e <script>`.
pub struct AppleScript<'a, R> {
    runner: &'a R,
    osascript: &'a str,
    env: Environment,
}

impl<'a, R> AppleScript<'a, R>
where
    R: CommandRunner,
{
    pub const fn new(runner: &'a R, osascript: &'a str, env: Environment) -> Self {
        Self { runner, osascript, env }
    }

    async fn run(&self, script: String) -> Result<String, Error> {
        let command = vec![self.osascript.to_string(), "-e".to_string(), script];
        self.runner.run_command(&command, &self.env).await
    }
}

impl<R> Desktop for AppleScript<'_, R>
where
    R: CommandRunner,
{
    async fn notify(&self, title: &str, message: &str) -> Result<(), Error> {
        let _output = self.run(notification_script(title, message)).await?;
        Ok(())
    }

    async fn alert(&self, title: &str, message: &str) -> Result<(), Error> {
        let _output = self.run(alert_script(title, message)).await?;
        Ok(())
    }

    async fn prompt(&self, title: &str, question: &str) -> Result<Option<String>, Error> {
        // cancelling the dialog makes osascript fail with nothing on stdout
        let answer = self.run(prompt_script(title, question)).await?;
        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }
}

fn notification_script(title: &str, message: &str) -> String {
    format!("display notification {} with title {}", quote(message), quote(title))
}

fn alert_script(title: &str, message: &str) -> String {
    format!("display alert {} message {} as critical", quote(title), quote(message))
}

fn prompt_script(title: &str, question: &str) -> String {
    format!(
        "text returned of (display dialog {} default answer \"\" with title {})",
        quote(question),
        quote(title)
    )
}

/// AppleScript string literal.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
