// MoltMarkets agent setup library
// Creates the agent's memory files and validates API credentials

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod scaffold;
pub mod setup;
pub mod templates;

// Re-export commonly used types
pub use api::{MoltMarketsApi, UserProfile};
pub use config::{CliConfig, SetupConfig};
pub use credentials::Credentials;
pub use error::{SetupError, SetupResult};
pub use models::*;
pub use scaffold::{ensure_dir, scaffold, write_if_absent, ScaffoldReport};
pub use setup::{next_steps, run_setup, SetupStage, SetupSummary};
pub use templates::{default_memory_files, MemoryFile};
