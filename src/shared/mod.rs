//! Cross-cutting helpers shared by all layers

pub mod shutdown;

pub use shutdown::{listen_for_shutdown_signals, ShutdownSignal};
