pub mod model;
pub mod view;
pub mod update;
pub mod showcase;

// Re-exports for convenience
pub use model::*;
pub use view::*;
pub use update::*;
