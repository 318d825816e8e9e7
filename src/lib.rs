//! carros - In-memory vehicle registry served over HTTP
//!
//! Records are encoded to a compact binary form on insert and decoded on
//! every read; only the bytes stay resident.

pub mod cli;
pub mod codec;
pub mod http_server;
pub mod logging;
pub mod model;
pub mod store;
pub mod validation;
