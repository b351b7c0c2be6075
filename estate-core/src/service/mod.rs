pub mod error;
pub mod expiry_sweep;
pub mod status_service;
pub mod visit_service;
