//! Remote matcher module
//!
//! The transport seam of the crate: the `RemoteMatcher` trait, the worker
//! thread that runs lookups off the owner's thread, and the HTTP
//! implementation used in production.

mod http;
pub mod types;
mod worker;

pub use http::HttpRemoteMatcher;
pub use types::{
    RemoteError, RemoteMatcher, RemoteOutcome, RemoteQuery, RemoteRequest, RemoteResponse,
};
pub use worker::spawn_remote_worker;
