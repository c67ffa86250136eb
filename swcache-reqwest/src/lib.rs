#![doc = include_str!("../README.md")]

mod network;

pub use network::ReqwestNetwork;

/// Re-export of the middleware client type accepted by [`ReqwestNetwork`].
pub use reqwest_middleware::ClientWithMiddleware;
