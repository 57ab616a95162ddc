//! fatsecret-export library
//!
//! This crate provides the core functionality for the `fatsecret-export` binary.
//! Keep the crate root minimal; implementation and tests live in their modules.
//!
//! ## Overview
//!
//! - [`client`] - OAuth-signed FatSecret REST client, token cache and the [`client::DiaryApi`] seam
//! - [`exporter`] - Date-range fetch loops for food, exercise and weight records
//! - [`date_codec`] - Conversion between calendar dates and the service's day codes
//! - [`writer`] - CSV output under a fixed per-kind schema
//! - [`cli`] - Command-line interface orchestrating the export
//! - [`config`] - `~/.fatsecret` config file
//! - [`models`] - Data kinds, date ranges and records
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use fatsecret_export::client::{FatSecretClient, TokenStore};
//! use fatsecret_export::config::Config;
//! use fatsecret_export::exporter::{Exporter, Throttle};
//! use fatsecret_export::models::{DataKind, DateRange};
//! use fatsecret_export::{date_codec, errors::AppResult, writer};
//! use std::path::Path;
//!
//! # async fn example() -> AppResult<()> {
//! let config = Config::from_file(Path::new("/home/me/.fatsecret"))?;
//! let mut store = TokenStore::open(&config.user.datastore)?;
//! let mut client = FatSecretClient::from_config(&config);
//! client.authorize(&config.user.name, &mut store).await?;
//!
//! let range = DateRange::new(
//!     date_codec::parse_date("2023-01-01")?,
//!     date_codec::parse_date("2023-01-31")?,
//! );
//! let batch = Exporter::new(&client, Throttle::default())
//!     .export(DataKind::Food, range)
//!     .await?;
//! writer::write_batch(std::io::stdout(), &batch)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod date_codec;
pub mod errors;
pub mod exporter;
pub mod models;
pub mod writer;
