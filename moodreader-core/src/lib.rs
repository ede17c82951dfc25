pub mod catalog;
pub mod config;
pub mod prompt;
pub mod text;
pub mod types;

// Keep the public surface small and intentional.
pub use catalog::*;
pub use config::*;
pub use prompt::*;
pub use text::*;
pub use types::*;
