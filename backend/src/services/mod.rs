//! Service layer: pure transformations from parsed tables to views.
//!
//! Nothing here touches the network or the filesystem. The store calls these
//! once per refresh and the view controller calls the chart builders per
//! submission.

pub mod aggregation;
pub mod charts;
pub mod dashboard;
pub mod lookups;
pub mod metrics;
pub mod reshape;
pub mod tables;
