pub mod clock;
pub mod clipboard;
