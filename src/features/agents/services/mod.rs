mod agent_service;

pub use agent_service::AgentService;
