//! JSON-RPC relay client for the Socialinsider analytics API.

pub mod client;
pub mod error;
pub mod types;

pub use client::UpstreamClient;
pub use error::UpstreamError;
pub use types::{DateWindow, PostsPage, RpcMethod, RpcParams, RpcRequest};
