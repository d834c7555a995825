//! Health checks

pub mod health;

pub use health::{ComponentHealth, HealthChecker, HealthStatus, SystemHealth};
