mod installation_handler;

pub use installation_handler::*;
