//! Traits and implementations behind the visitor access lifecycle.
//!
//! The service layer in `estate-core` only talks to the abstractions defined
//! here: storage for visit requests and access credentials, the credential
//! token codec, and the external collaborators (PIN validation, resident
//! directory, document storage, notification dispatch). Each module ships at
//! least one implementation so the lifecycle can run end to end in memory.

pub mod access_credential_storage;
pub mod clock;
pub mod common_models;
pub mod credential_codec;
pub mod document_storage;
pub mod http_client;
pub mod notification;
pub mod pin_validation;
pub mod resident_directory;
pub mod visit_request_storage;
