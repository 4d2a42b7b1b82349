//! Parsers turning source payloads into raw tables, and views back into CSV.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Read uploaded CSV with Polars; write filtered views as CSV
//! - [`json_parser`]: Read JSON arrays of row objects
//!
//! # Example
//!
//! ```
//! use yt_analytics::parsing::csv_parser::parse_video_csv_bytes;
//!
//! let csv = b"title,views,comments,likes,date,content_type\nA,100,5,10,2025-01-01 10:00,Shorts\n";
//! let table = parse_video_csv_bytes(csv).unwrap();
//! assert_eq!(table.len(), 1);
//! ```

pub mod csv_parser;
pub mod json_parser;


pub use csv_parser::{parse_video_csv, parse_video_csv_bytes, view_to_dataframe, write_view_csv};
pub use json_parser::{parse_video_json, parse_video_json_str, parse_video_rows};
