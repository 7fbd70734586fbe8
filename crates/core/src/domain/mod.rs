pub mod tabs;
pub mod command;
pub mod output;
pub mod tags;
pub mod showcase;

// Re-exports for convenience
pub use tabs::*;
pub use command::*;
pub use output::*;
pub use tags::*;
pub use showcase::*;
