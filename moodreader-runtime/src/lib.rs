pub mod config_store;
pub mod credentials;
pub mod defaults;
pub mod fs;
pub mod runtime_engine;
