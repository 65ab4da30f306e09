// ABOUTME: Test support utilities.
// ABOUTME: Provides a scripted CommandRunner and tracing setup for integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use elastic_package::process::{CommandOutput, CommandRunner, ExecError, Invocation};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("elastic_package=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Scripted outcome for one invocation.
#[allow(dead_code)]
pub enum Reply {
    Ok(&'static str),
    Fail { code: i32, stderr: &'static str },
}

/// A runner that records every invocation and answers from a script.
///
/// Replies are matched to invocations whose argument line starts with the
/// given prefix; the first matching reply is consumed. Unmatched
/// invocations succeed with empty output.
#[derive(Clone, Default)]
pub struct FakeRunner {
    calls: Arc<Mutex<Vec<Invocation>>>,
    replies: Arc<Mutex<VecDeque<(String, Reply)>>>,
}

#[allow(dead_code)]
impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, prefix: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back((prefix.to_string(), reply));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Argument lines joined with spaces, in call order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|invocation| invocation.args().join(" "))
            .collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    fn program(&self) -> &str {
        "docker"
    }

    async fn exec(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
        self.calls.lock().unwrap().push(invocation.clone());
        let line = invocation.args().join(" ");

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            let position = replies
                .iter()
                .position(|(prefix, _)| line.starts_with(prefix.as_str()));
            position.and_then(|idx| replies.remove(idx))
        };

        match reply {
            None => Ok(CommandOutput::default()),
            Some((_, Reply::Ok(stdout))) => Ok(CommandOutput {
                stdout: stdout.as_bytes().to_vec(),
                stderr: String::new(),
            }),
            Some((_, Reply::Fail { code, stderr })) => Err(ExecError::Failed {
                command: invocation.command_line("docker"),
                code: Some(code),
                stderr: stderr.to_string(),
            }),
        }
    }
}
