pub mod timestamps;

pub use timestamps::{
    end_of_day_exclusive, format_timestamp, parse_timestamp, start_of_day, EXPORT_TIMESTAMP_FORMAT,
};
