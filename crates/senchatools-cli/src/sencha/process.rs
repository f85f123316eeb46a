//! Running the external sencha executable.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use tokio::process::Command;

use crate::error::BuildError;

/// The tool executable plus the watchdog applied to every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    program: String,
    timeout: Option<Duration>,
}

impl Tool {
    pub fn new(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// The platform shell, for commands configured as a single string.
    pub fn shell(timeout: Option<Duration>) -> Self {
        if cfg!(windows) {
            Self::new("cmd", timeout)
        } else {
            Self::new("sh", timeout)
        }
    }

    /// Invocation running `command` through [`Tool::shell`].
    pub fn shell_command(command: &str, timeout: Option<Duration>) -> Invocation {
        let flag = if cfg!(windows) { "/C" } else { "-c" };
        Self::shell(timeout).invocation([flag, command])
    }

    /// Start building an invocation of this tool.
    pub fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Invocation {
            program: self.program.clone(),
            args: args.into_iter().map(Into::into).collect(),
            timeout: self.timeout,
        }
    }
}

/// One command line to run.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl Invocation {
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The command line as it would be typed in a shell.
    pub fn display(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion in `cwd`, inheriting stdout and stderr.
    ///
    /// # Errors
    ///
    /// - `ToolNotFound` if the process cannot be spawned
    /// - `ToolTimeout` if it outlives the watchdog (it is killed)
    /// - `ExternalTool` on a non-zero exit
    pub async fn run(&self, cwd: &Path) -> Result<(), BuildError> {
        let invocation = self.display();
        tracing::debug!("Running: {}", invocation);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(cwd)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BuildError::ToolNotFound {
                program: self.program.clone(),
                source,
            })?;

        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!("Failed to kill `{}`: {}", invocation, e);
                    }
                    return Err(BuildError::ToolTimeout {
                        invocation,
                        secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait().await,
        }
        .map_err(|source| BuildError::ToolNotFound {
            program: self.program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(BuildError::ExternalTool { invocation, status });
        }

        Ok(())
    }
}
