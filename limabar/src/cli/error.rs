use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: crate::config::Error },

    #[snafu(display("{source}"))]
    Command { source: crate::command::Error },

    #[snafu(display("{flag} requires --target"))]
    MissingTarget { flag: &'static str },

    #[snafu(display("Failed to resolve the path of this program, error: {source}"))]
    ResolveProgramPath { source: std::io::Error },

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to create tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: std::io::Error },
}

impl From<crate::config::Error> for Error {
    fn from(source: crate::config::Error) -> Self { Self::Configuration { source } }
}

impl From<crate::command::Error> for Error {
    fn from(source: crate::command::Error) -> Self { Self::Command { source } }
}
