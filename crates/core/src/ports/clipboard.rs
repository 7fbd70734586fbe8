use anyhow::Result;

/// Port for putting text on the user's clipboard
pub trait ClipboardPort {
    fn copy(&mut self, text: &str) -> Result<()>;
}
