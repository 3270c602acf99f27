/*
[INPUT]:  Public API exports for bytewallet-cli crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod handler;
pub mod logging;

// Re-export main types for convenience
pub use config::GatewayConfig;
pub use handler::LoggingCallbackHandler;
pub use logging::init_tracing;
