pub mod api;
pub mod client;
pub mod protocol;

pub use api::{CodeFixApi, FixOutcome};
pub use client::ServiceClient;
