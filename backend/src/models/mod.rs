pub mod filters;
pub mod series;
pub mod table;

pub use filters::*;
pub use series::*;
pub use table::*;
