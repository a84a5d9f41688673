use thiserror::Error;

/// Errors returned by the per-service accessors of [`Client`](crate::Client).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ServiceInitError {
    /// A thread panicked while holding the slot lock.
    #[error("service client slot for {service} is poisoned")]
    Poisoned {
        /// Fully qualified gRPC service name.
        service: &'static str,
    },

    /// The service client could not be constructed.
    #[error("failed to construct {service} client: {reason}")]
    Construct {
        /// Fully qualified gRPC service name.
        service: &'static str,
        /// Why construction failed.
        reason: String,
    },
}
