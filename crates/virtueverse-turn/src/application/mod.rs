//! Application services: load the session, run the domain, persist.

pub mod command_handlers;
pub mod query_handlers;
