mod installation;

pub use installation::{InstallationDetails, InstallationRecord, InstallationStatus};
