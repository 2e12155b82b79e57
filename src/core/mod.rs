//! Core library modules for img-grab
//!
//! This module contains the internal implementation details of the img-grab library.

pub mod error;
pub mod page;
pub mod markup;
pub mod resolve;
pub mod stream;
pub mod downloader;

// Re-export main types for internal use
pub use resolve::{resolve_filename, resolve_reference};
pub use downloader::Downloader;
