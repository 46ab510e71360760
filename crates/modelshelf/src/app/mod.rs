//! Application context
//!
//! Everything a front end needs, created at startup and passed down
//! explicitly.

pub mod context;

pub use context::{AppContext, OpenOptions};
