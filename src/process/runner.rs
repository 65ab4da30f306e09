// ABOUTME: Process runner trait and the tokio-backed implementation.
// ABOUTME: Drains both pipes concurrently, tee-ing to the console when debugging.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

use super::error::ExecError;

/// Runner settings chosen once per CLI invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Mirror child stdout/stderr to this process's own streams.
    pub debug: bool,
}

/// Arguments and extra environment for one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    /// Append variables on top of the inherited environment.
    pub fn with_env<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.env.extend(vars);
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Render as a shell-like command line for logs and errors.
    pub fn command_line(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Buffered output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Executes external commands for a single program (e.g. `docker`).
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Program name used in logs and error messages.
    fn program(&self) -> &str;

    /// Run to completion. Non-zero exit is an error carrying captured stderr.
    async fn exec(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError>;
}

/// Runs commands as child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    config: RunnerConfig,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>, config: RunnerConfig) -> Self {
        Self {
            program: program.into(),
            config,
        }
    }

    pub fn docker(config: RunnerConfig) -> Self {
        Self::new("docker", config)
    }

    pub fn config(&self) -> RunnerConfig {
        self.config
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    fn program(&self) -> &str {
        &self.program
    }

    async fn exec(&self, invocation: &Invocation) -> Result<CommandOutput, ExecError> {
        let command = invocation.command_line(&self.program);
        tracing::debug!("run command: {}", command);

        let mut child = Command::new(&self.program)
            .args(invocation.args())
            .envs(invocation.env().iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                command: command.clone(),
                source,
            })?;

        let debug = self.config.debug;
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let (stdout, stderr, status) = tokio::join!(
            drain(stdout_pipe, debug.then(tokio::io::stdout)),
            drain(stderr_pipe, debug.then(tokio::io::stderr)),
            child.wait(),
        );

        let io_error = |source: std::io::Error| ExecError::Io {
            command: command.clone(),
            source,
        };
        let stdout = stdout.map_err(io_error)?;
        let stderr = String::from_utf8_lossy(&stderr.map_err(io_error)?).into_owned();
        let status = status.map_err(io_error)?;

        if !status.success() {
            tracing::debug!("command failed: {} ({})", command, status);
            return Err(ExecError::Failed {
                command,
                code: status.code(),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

/// Read a pipe to EOF, optionally copying every chunk to `mirror`.
async fn drain<R, W>(pipe: Option<R>, mut mirror: Option<W>) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffered = Vec::new();
    let Some(mut pipe) = pipe else {
        return Ok(buffered);
    };

    let mut chunk = [0u8; 8192];
    loop {
        let n = pipe.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        if let Some(out) = mirror.as_mut() {
            out.write_all(&chunk[..n]).await?;
            out.flush().await?;
        }
        buffered.extend_from_slice(&chunk[..n]);
    }
    Ok(buffered)
}
