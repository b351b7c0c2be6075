pub mod retry;
pub mod tracing_dispatcher;
