// Run metadata persistence and change detection

pub mod change;
pub mod manager;

pub use change::should_process;
pub use manager::{RunMetadata, StateManager};
