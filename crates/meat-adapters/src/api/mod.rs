//! Remote project API adapters.

mod http;
mod memory;

pub use http::HttpProjectApi;
pub use memory::{ApiCall, InMemoryProjectApi};
