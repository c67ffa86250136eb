#![warn(missing_docs)]
//! # swcache-core
//!
//! Core types for the swcache offline caching worker.
//!
//! This crate holds the protocol-level vocabulary that every other swcache
//! crate speaks. It deliberately knows nothing about cache storage or
//! lifecycle policy:
//!
//! - **Requests** ([`Request`]) as the worker intercepts them, including the
//!   navigation [`RequestMode`]
//! - **Responses** ([`Response`]) as buffered, cheaply clonable snapshots
//! - **Identity** ([`RequestKey`], [`VaryHeaders`]) used to address entries
//!   inside a cache partition
//! - **Network** ([`Network`]) the seam through which the worker reaches the
//!   origin server
//! - **Push data** ([`PushData`]) delivered by the platform's push transport

pub mod key;
pub mod network;
pub mod push;
pub mod request;
pub mod response;

pub use key::{RequestKey, VaryHeaders};
pub use network::{FetchError, Network};
pub use push::PushData;
pub use request::{Request, RequestMode};
pub use response::Response;
#[doc(hidden)]
pub use smol_str::SmolStr;
