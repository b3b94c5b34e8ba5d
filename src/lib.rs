pub mod config;
pub mod dashboard;
pub mod data;
pub mod metrics;
pub mod pipeline;

#[cfg(feature = "full")]
pub mod api;
#[cfg(feature = "full")]
pub mod cli;
#[cfg(feature = "full")]
pub mod price;
#[cfg(feature = "full")]
pub mod refresh;
#[cfg(feature = "full")]
pub mod report;
