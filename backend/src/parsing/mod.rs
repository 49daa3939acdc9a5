//! Parsers for the upstream CSV files.
//!
//! - [`csv_parser`]: wide per-region time-series files
//! - [`lookup_parser`]: country → ISO code and country → continent tables
//!
//! All parsers report shape problems as schema errors so a refresh aborts
//! instead of computing statistics from a file it does not understand.

pub mod csv_parser;
pub mod lookup_parser;


pub use csv_parser::{parse_series_csv, parse_series_file};
pub use lookup_parser::{
    parse_continents, parse_continents_file, parse_iso_codes, parse_iso_codes_file,
};
