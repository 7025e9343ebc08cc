pub mod config;
pub mod contact;
pub mod error;
pub mod estimator;
pub mod hours;
pub mod telemetry;
