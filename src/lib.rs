pub mod assistant;
pub mod cli;
pub mod config;
pub mod llm;
pub mod research;
pub mod search;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transcript;
pub mod workflow;

// Re-export commonly used types
pub use assistant::{CareerAssistant, QuickAction, process_query};
pub use config::Config;
pub use workflow::launch;
