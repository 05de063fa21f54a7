pub mod health;
pub mod process;

pub use health::{EnhancedHealth, MemoryUsage};
pub use process::ProcessRecord;
