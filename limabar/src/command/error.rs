use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Cannot run an empty command line"))]
    EmptyCommand,

    /// The program could not be started at all, usually because it is not
    /// installed or not on the prepared `PATH`.
    #[snafu(display("Failed to run `{command}`, error: {source}"))]
    SpawnCommand { command: String, source: std::io::Error },
}
