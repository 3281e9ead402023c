pub mod filter;
mod installation_service;

pub use installation_service::InstallationService;
