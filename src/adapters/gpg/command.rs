use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use secrecy::{ExposeSecret, SecretString};

use crate::core::errors::{EzGpgError, Result};

/// Prefix of machine-readable lines written to `--status-fd`.
const STATUS_PREFIX: &str = "[GNUPG:] ";

/// Client used to talk to the running gpg-agent.
const CONNECT_AGENT: &str = "gpg-connect-agent";

/// Where and how to run gpg. Cheap to clone, holds no keyring state.
#[derive(Debug, Clone)]
pub struct GpgCommand {
    binary: PathBuf,
    homedir: Option<PathBuf>,
}

/// Captured result of one gpg invocation.
#[derive(Debug)]
pub struct GpgOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// One `[GNUPG:] KEYWORD args...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub keyword: String,
    pub args: Vec<String>,
}

impl GpgCommand {
    pub fn new(binary: PathBuf, homedir: Option<PathBuf>) -> Self {
        Self { binary, homedir }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Check that the binary can be started at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    /// Base arguments shared by every non-interactive invocation.
    /// Status lines always go to stderr so stdout stays free for data.
    pub fn batch_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if let Some(home) = &self.homedir {
            args.push("--homedir".into());
            args.push(home.into());
        }
        args.extend(["--batch", "--no-tty", "--status-fd", "2"].map(OsString::from));
        args
    }

    /// Base arguments plus loopback pinentry reading the passphrase from stdin.
    pub fn passphrase_args(&self) -> Vec<OsString> {
        let mut args = self.batch_args();
        args.extend(["--pinentry-mode", "loopback", "--passphrase-fd", "0"].map(OsString::from));
        args
    }

    /// Run gpg with `args`, optionally feeding `stdin`, and capture output.
    ///
    /// A non-zero exit is not an error here; callers decide what it means.
    pub fn run(&self, args: &[OsString], stdin: Option<&[u8]>) -> Result<GpgOutput> {
        tracing::debug!(binary = %self.binary.display(), ?args, "running gpg");

        let mut cmd = Command::new(&self.binary);
        cmd.args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;

        if let Some(data) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                // gpg may exit before reading everything; that shows up in its exit status.
                if let Err(e) = pipe.write_all(data) {
                    tracing::debug!(error = %e, "gpg closed stdin early");
                }
            }
        }

        let output = child.wait_with_output()?;
        tracing::debug!(status = %output.status, "gpg finished");

        Ok(GpgOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Run with the passphrase as the first stdin line, followed by `data`.
    pub fn run_with_passphrase(
        &self,
        args: &[OsString],
        passphrase: &SecretString,
        data: &[u8],
    ) -> Result<GpgOutput> {
        let secret = passphrase.expose_secret();
        let mut input = Vec::with_capacity(secret.len() + 1 + data.len());
        input.extend_from_slice(secret.as_bytes());
        input.push(b'\n');
        input.extend_from_slice(data);
        let result = self.run(args, Some(&input));
        input.fill(0);
        result
    }

    /// `gpg-connect-agent` from the same directory as gpg, if it is there.
    pub fn agent_client(&self) -> PathBuf {
        self.binary
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(CONNECT_AGENT))
            .filter(|path| path.is_file())
            .unwrap_or_else(|| PathBuf::from(CONNECT_AGENT))
    }

    /// Send assuan `commands` to gpg-agent, one argument each, then `/bye`.
    pub fn run_agent(&self, commands: &[String]) -> Result<GpgOutput> {
        let client = self.agent_client();
        let mut args: Vec<OsString> = Vec::new();
        if let Some(home) = &self.homedir {
            args.push("--homedir".into());
            args.push(home.into());
        }
        args.extend(commands.iter().map(OsString::from));
        args.push("/bye".into());
        tracing::debug!(client = %client.display(), ?args, "talking to gpg-agent");

        let output = Command::new(&client)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EzGpgError::ToolNotFound {
                        binary: client.clone(),
                    }
                } else {
                    EzGpgError::Io(e)
                }
            })?;

        Ok(GpgOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn spawn_error(&self, e: std::io::Error) -> EzGpgError {
        if e.kind() == std::io::ErrorKind::NotFound {
            EzGpgError::ToolNotFound {
                binary: self.binary.clone(),
            }
        } else {
            EzGpgError::Io(e)
        }
    }
}

impl GpgOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Stderr without status lines, for error messages.
    pub fn diagnostics(&self) -> String {
        String::from_utf8_lossy(&self.stderr)
            .lines()
            .filter(|l| !l.starts_with(STATUS_PREFIX))
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Status lines emitted on stderr via `--status-fd 2`.
    pub fn status_lines(&self) -> Vec<StatusLine> {
        parse_status_lines(&String::from_utf8_lossy(&self.stderr))
    }

    /// Whether any status line carries `keyword`.
    pub fn has_status(&self, keyword: &str) -> bool {
        self.status_lines().iter().any(|s| s.keyword == keyword)
    }
}

/// Extract `[GNUPG:]` status lines from mixed gpg output.
pub fn parse_status_lines(text: &str) -> Vec<StatusLine> {
    text.lines()
        .filter_map(|line| line.trim_end().strip_prefix(STATUS_PREFIX))
        .filter_map(|rest| {
            let mut parts = rest.split(' ');
            let keyword = parts.next().filter(|k| !k.is_empty())?;
            Some(StatusLine {
                keyword: keyword.to_string(),
                args: parts.map(str::to_string).collect(),
            })
        })
        .collect()
}
