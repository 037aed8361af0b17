//! Actix middleware used by the server assembly.

pub mod request_log;

pub use request_log::RequestLog;
