mod agent_dto;

pub use agent_dto::*;
