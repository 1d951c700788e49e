//! User-facing desktop interactions: notifications, alerts and text prompts.

mod apple_script;

pub use self::apple_script::AppleScript;
use crate::command::Error;

pub trait Desktop {
    /// Posts a notification and returns without waiting for the user.
    async fn notify(&self, title: &str, message: &str) -> Result<(), Error>;

    /// Shows a modal alert and waits until it is dismissed.
    async fn alert(&self, title: &str, message: &str) -> Result<(), Error>;

    /// Asks the user for a line of text and waits for the answer.
    ///
    /// Returns `None` if the dialog was cancelled or the answer is blank.
    async fn prompt(&self, title: &str, question: &str) -> Result<Option<String>, Error>;
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::Desktop;
    use crate::command::Error;

    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum Interaction {
        Notify { title: String, message: String },
        Alert { title: String, message: String },
        Prompt { title: String, question: String },
    }

    /// Answers every prompt with a fixed response and records what the user
    /// would have seen.
    #[derive(Debug, Default)]
    pub struct RecordingDesktop {
        answer: Option<String>,
        interactions: Mutex<Vec<Interaction>>,
    }

    impl RecordingDesktop {
        pub fn answering(answer: &str) -> Self {
            Self { answer: Some(answer.to_string()), ..Self::default() }
        }

        pub fn interactions(&self) -> Vec<Interaction> { self.interactions.lock().unwrap().clone() }

        pub fn alerts(&self) -> usize {
            self.interactions()
                .iter()
                .filter(|interaction| matches!(interaction, Interaction::Alert { .. }))
                .count()
        }

        fn record(&self, interaction: Interaction) {
            self.interactions.lock().unwrap().push(interaction);
        }
    }

    impl Desktop for RecordingDesktop {
        async fn notify(&self, title: &str, message: &str) -> Result<(), Error> {
            self.record(Interaction::Notify {
                title: title.to_string(),
                message: message.to_string(),
            });
            Ok(())
        }

        async fn alert(&self, title: &str, message: &str) -> Result<(), Error> {
            self.record(Interaction::Alert {
                title: title.to_string(),
                message: message.to_string(),
            });
            Ok(())
        }

        async fn prompt(&self, title: &str, question: &str) -> Result<Option<String>, Error> {
            self.record(Interaction::Prompt {
                title: title.to_string(),
                question: question.to_string(),
            });
            Ok(self.answer.clone().filter(|answer| !answer.trim().is_empty()))
        }
    }
}
