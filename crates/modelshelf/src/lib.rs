//! Modelshelf services
//!
//! Content catalog, liked-item persistence, sharing and settings for the
//! modelshelf 3D/AR model viewer. Front ends build an [`app::AppContext`]
//! and drive everything through it.

pub mod app;
pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod network;
pub mod share;

pub use app::AppContext;
pub use error::{AppError, Result};
