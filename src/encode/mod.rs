//! Frame sinks.

/// Sink trait plus in-memory and PNG implementations.
pub mod sink;
