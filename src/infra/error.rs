use thiserror::Error;

/// Infrastructure errors that can occur during application startup.
///
/// SECURITY: Display messages are sanitized and safe for logs/console output.
/// Debug output includes the full #[source] error chain which may contain
/// secrets (e.g., connection strings) - use Display (%e) not Debug (?e) in logs.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("MongoDB connection failed. Check MONGODB_URI and ensure the database is running.")]
    StoreConnection(#[source] mongodb::error::Error),

    #[error("Creating unique email indexes failed. Remove duplicate emails or unset ENFORCE_UNIQUE_EMAIL.")]
    IndexCreation(#[source] mongodb::error::Error),

    #[error("Redis connection failed. Check REDIS_URL and credentials.")]
    RedisConnection(#[source] redis::RedisError),

    #[error("TCP bind failed")]
    TcpBind(#[source] std::io::Error),

    #[error("Server error")]
    Server(#[source] std::io::Error),
}
