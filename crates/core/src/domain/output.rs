/// Text the log starts with
pub const WELCOME_TEXT: &str = "Git Artifact Manager initialized successfully!\nReady to execute commands...\n";

/// Text the log holds right after being cleared
pub const CLEARED_TEXT: &str = "Command output cleared.\n";

/// One appended piece of transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    /// Wall-clock label of the moment the chunk was appended
    pub timestamp: String,
    pub text: String,
}

/// Append-only transcript shown in the output pane.
///
/// Nothing reads the log back except rendering. `revision` bumps on every
/// change so views can tell when to snap back to the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLog {
    chunks: Vec<OutputChunk>,
    revision: u64,
}

impl OutputLog {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self::with_text(timestamp, WELCOME_TEXT)
    }

    fn with_text(timestamp: impl Into<String>, text: &str) -> Self {
        Self {
            chunks: vec![OutputChunk {
                timestamp: timestamp.into(),
                text: text.to_string(),
            }],
            revision: 0,
        }
    }

    pub fn append(&mut self, timestamp: impl Into<String>, text: impl Into<String>) {
        self.chunks.push(OutputChunk {
            timestamp: timestamp.into(),
            text: text.into(),
        });
        self.revision += 1;
    }

    /// Drop everything and leave only the "cleared" notice
    pub fn clear(&mut self, timestamp: impl Into<String>) {
        let revision = self.revision + 1;
        *self = Self::with_text(timestamp, CLEARED_TEXT);
        self.revision = revision;
    }

    pub fn chunks(&self) -> &[OutputChunk] {
        &self.chunks
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The whole transcript as one string
    pub fn text(&self) -> String {
        self.chunks.iter().map(|chunk| chunk.text.as_str()).collect()
    }

    /// Transcript lines for display. A trailing newline does not produce an
    /// extra empty line.
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_has_welcome_text() {
        let log = OutputLog::new("10:00:00");
        assert_eq!(log.chunks().len(), 1);
        assert_eq!(
            log.lines(),
            vec![
                "Git Artifact Manager initialized successfully!",
                "Ready to execute commands...",
            ]
        );
    }

    #[test]
    fn test_append_keeps_order_and_timestamps() {
        let mut log = OutputLog::new("10:00:00");
        log.append("10:00:01", "first\n");
        log.append("10:00:02", "second\n");

        let chunks = log.chunks();
        assert_eq!(chunks[1].timestamp, "10:00:01");
        assert_eq!(chunks[2].text, "second\n");
        assert!(log.text().ends_with("first\nsecond\n"));
        assert_eq!(log.revision(), 2);
    }

    #[test]
    fn test_clear_leaves_single_notice() {
        let mut log = OutputLog::new("10:00:00");
        log.append("10:00:01", "noise\n");
        log.clear("10:00:02");
        assert_eq!(log.lines(), vec!["Command output cleared."]);
        assert_eq!(log.chunks().len(), 1);

        log.clear("10:00:03");
        assert_eq!(log.lines(), vec!["Command output cleared."]);
        assert_eq!(log.revision(), 3);
    }
}
