pub mod access_credential;
pub mod document;
pub mod macros;
pub mod resident;
pub mod visit;
