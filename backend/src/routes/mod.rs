pub mod charts;
pub mod dashboard;
pub mod summary;
pub mod table;
