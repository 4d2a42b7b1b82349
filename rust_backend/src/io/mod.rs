//! Data sources: file and in-memory loaders plus the demo generator.
//!
//! # Example
//!
//! ```no_run
//! use yt_analytics::io::loaders::VideoLoader;
//! use std::path::Path;
//!
//! let outcome = VideoLoader::load_from_file(Path::new("videos.csv"))
//!     .expect("Failed to load");
//! println!("Loaded {} videos", outcome.dataset.len());
//! ```

pub mod demo;
pub mod loaders;


pub use demo::{generate_demo_table, DemoConfig};
pub use loaders::{VideoLoader, VideoSourceType};
