pub mod client;
pub mod error;

pub use client::{GitHubTreeClient, GitHubTreeClientConfig};
pub use error::FetchError;
