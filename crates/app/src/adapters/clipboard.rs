use artifact_demo_core::ports::ClipboardPort;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("system clipboard not available")]
    Unavailable,

    #[error("system clipboard write failed: {0}")]
    System(#[from] arboard::Error),

    #[error("terminal clipboard write failed: {0}")]
    Terminal(#[from] io::Error),
}

/// OSC 52 escape sequence asking the terminal to set its clipboard
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Copies through the system clipboard, falling back to an OSC 52 escape
/// written to the terminal when the system clipboard is missing or fails
pub struct SystemClipboard<W: Write> {
    system: Option<arboard::Clipboard>,
    terminal: W,
}

impl SystemClipboard<io::Stdout> {
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!("System clipboard unavailable, using OSC 52 only: {}", e);
                None
            }
        };
        Self::with_writer(system, io::stdout())
    }
}

impl Default for SystemClipboard<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> SystemClipboard<W> {
    pub fn with_writer(system: Option<arboard::Clipboard>, terminal: W) -> Self {
        Self { system, terminal }
    }

    pub fn writer(&self) -> &W {
        &self.terminal
    }

    fn copy_system(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self.system.as_mut().ok_or(ClipboardError::Unavailable)?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }

    fn copy_osc52(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.terminal.write_all(osc52_sequence(text).as_bytes())?;
        self.terminal.flush()?;
        Ok(())
    }
}

impl<W: Write> ClipboardPort for SystemClipboard<W> {
    fn copy(&mut self, text: &str) -> anyhow::Result<()> {
        match self.copy_system(text) {
            Ok(()) => {
                debug!("Copied {} bytes to the system clipboard", text.len());
                Ok(())
            }
            Err(e) => {
                warn!("Falling back to OSC 52 clipboard: {}", e);
                self.copy_osc52(text)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence_encodes_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_falls_back_to_terminal_without_system_clipboard() -> anyhow::Result<()> {
        let mut clipboard = SystemClipboard::with_writer(None, Vec::new());
        clipboard.copy("git artifact init")?;

        let written = String::from_utf8(clipboard.writer().clone())?;
        assert_eq!(written, osc52_sequence("git artifact init"));
        Ok(())
    }

    #[test]
    fn test_terminal_failure_is_reported() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut clipboard = SystemClipboard::with_writer(None, Broken);
        assert!(clipboard.copy("text").is_err());
    }
}
