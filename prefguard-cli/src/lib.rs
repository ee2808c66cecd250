// All classification functionality is in prefguard-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod export;
pub mod logging;

// Re-export core types for convenience
pub use prefguard_core::*;

// Re-export CLI utilities
pub use export::{run_export, ExportOutcome};
