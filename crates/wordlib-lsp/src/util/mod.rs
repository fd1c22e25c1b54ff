//! Small helpers shared across the server.

pub mod uri;
