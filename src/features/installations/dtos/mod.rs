mod installation_dto;

pub use installation_dto::*;
