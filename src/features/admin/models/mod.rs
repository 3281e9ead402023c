mod activity_log;
mod user;

pub use activity_log::ActivityLogEntry;
pub use user::User;
