//! Gateway to the external record store.
//!
//! Every read and write of installations, agents, villages, users and the
//! activity log goes through the [`RecordStore`] trait. Handlers and the
//! aggregation code never format URLs or headers themselves.
//!
//! Raw payloads are normalised by [`ingest`], which resolves the field-name
//! synonyms the store has used over time into one canonical field each.

mod client;
mod error;
mod http_client;
pub mod ingest;
#[cfg(test)]
pub mod memory;

pub use client::{
    or_empty, AgentPayload, CommissionUpdate, InstallationConfirmation, InstallationUpdate,
    LoginPayload, NewInstallation, RecordStore, UserPayload, VillagePayload,
};
pub use error::StoreError;
pub use http_client::HttpRecordStore;
