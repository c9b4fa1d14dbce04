//! HTTP request issuing and the worker loop.
mod issuer;
mod worker;


pub use issuer::{RequestIssuer, build_client};
pub use worker::{WorkerContext, spawn_worker};
