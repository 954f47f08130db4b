//! # Runtime Adapters
//!
//! Concrete implementations of the outward ports: HTTP JSON-RPC for the
//! chain, a single JSON file for local persistence.

pub mod file_store;
pub mod rpc;

pub use file_store::JsonFileStore;
pub use rpc::RpcProvider;
