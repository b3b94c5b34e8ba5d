pub mod dashboard;
pub mod events;
