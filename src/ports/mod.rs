//! Port traits: the seams between domain logic and external collaborators.

pub mod config_port;
pub mod data_port;
pub mod report_port;
