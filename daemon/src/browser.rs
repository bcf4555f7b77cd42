use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use tracing::debug;

/// Something that can show a URL to the user.
pub trait Browser {
    /// Fire-and-forget: returns once the launch was requested, not once the
    /// page has loaded.
    fn open(&mut self, url: &str) -> Result<()>;

    /// Collects launchers that have exited since the last call.
    fn reap_finished(&mut self) {}
}

/// Opens URLs in the user's default browser via the platform launcher.
///
/// Launchers are not waited on at spawn time (some keep running until the
/// browser exits); their handles are kept and reaped once they finish.
#[derive(Debug, Default)]
pub struct SystemBrowser {
    /// Replaces the platform launcher; the URL is still the last argument.
    program: Option<String>,
    launched: Vec<Child>,
}

impl SystemBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_program(program: &str) -> Self {
        Self {
            program: Some(program.to_string()),
            launched: Vec::new(),
        }
    }
}

impl Browser for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<()> {
        self.reap_finished();

        let (program, args) = match &self.program {
            Some(program) => (program.as_str(), vec![url.to_string()]),
            None => launcher_command(url),
        };
        let child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch `{program}` for {url}"))?;
        self.launched.push(child);
        Ok(())
    }

    fn reap_finished(&mut self) {
        self.launched.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Browser launcher {} exited with {status}", child.id());
                false
            }
            Ok(None) => true,
            Err(e) => {
                debug!("Failed to poll browser launcher {}: {e}", child.id());
                false
            }
        });
    }
}

/// Program and arguments that hand `url` to the default browser.
fn launcher_command(url: &str) -> (&'static str, Vec<String>) {
    #[cfg(target_os = "windows")]
    {
        // `cmd /C start` would treat `&` in the URL as a command separator.
        (
            "rundll32",
            vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()],
        )
    }
    #[cfg(target_os = "macos")]
    {
        ("open", vec![url.to_string()])
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        ("xdg-open", vec![url.to_string()])
    }
}
