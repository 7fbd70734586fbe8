pub mod scheduler;
pub mod tag_browser;
pub mod session;

// Re-exports
pub use scheduler::*;
pub use tag_browser::*;
pub use session::*;
