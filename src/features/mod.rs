pub mod admin;
pub mod agents;
pub mod auth;
pub mod dashboard;
pub mod installations;
pub mod villages;
