pub mod time;
pub mod clipboard;

// Re-exports
pub use time::*;
pub use clipboard::*;
