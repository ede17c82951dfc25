pub mod client;
pub mod controller;
pub mod error;
pub mod session;
pub mod testing;
pub mod traits;
