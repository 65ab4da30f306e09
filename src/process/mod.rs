// ABOUTME: Synchronous-looking execution of external binaries.
// ABOUTME: Always buffers stdout/stderr; mirrors them to the console in debug mode.

mod error;
mod runner;

pub use error::ExecError;
pub use runner::{CommandOutput, CommandRunner, Invocation, ProcessRunner, RunnerConfig};
