#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod builder;
mod partition;
mod storage;

pub use builder::{ByteCapacity, EntryCapacity, MokaStorageBuilder, NoCapacity, Unbounded};
pub use moka::policy::EvictionPolicy;
pub use partition::MokaPartition;
pub use storage::MokaStorage;
