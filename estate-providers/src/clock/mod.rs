//! Source of "now" for expiry decisions.

use time::OffsetDateTime;

pub mod imp;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}
