//! Client for the Petstore REST API.
//!
//! [`ApiClient`] is a thin JSON wrapper over a [`Transport`]: it joins paths
//! onto a base URL, attaches a static header set (including an optional bearer
//! token), fails on 4xx/5xx responses and decodes JSON bodies on success.
//! [`PetstoreApi`] layers the typed Petstore operations on top of it.

mod client;
mod config;
mod error;
mod transport;

pub mod models;
pub mod petstore;

pub use client::ApiClient;
pub use config::{CONFIG_FILE_NAMES, ClientConfig};
pub use error::ClientError;
pub use petstore::PetstoreApi;
pub use transport::{ReqwestTransport, Transport, TransportError};
