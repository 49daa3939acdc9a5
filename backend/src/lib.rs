//! # COVID-19 Dashboard Backend
//!
//! Downloads the JHU CSSE global time series, derives every dashboard view
//! from them, and serves the views as Plotly-ready JSON next to a static page.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`config`]: TOML configuration with environment overrides
//! - [`models`]: Wide/country tables, series and view filters
//! - [`parsing`]: CSV decoding with schema checks
//! - [`services`]: Aggregation, metrics, tables and chart builders
//! - [`source`]: Download, retry and atomic replacement of the source files
//! - [`store`]: Immutable dataset snapshots and the store that swaps them
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types
//!
//! ## Refresh model
//!
//! A background task re-downloads the three series on a fixed period. A new
//! snapshot is built off to the side and installed with a single pointer
//! swap, so a request never sees a half-built dataset. When a refresh fails
//! the previous snapshot keeps serving.

// SourceError carries a full ErrorContext
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod models;
pub mod parsing;
pub mod routes;
pub mod services;
pub mod source;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;
