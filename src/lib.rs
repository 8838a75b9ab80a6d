//! # metar-info
//!
//! Decodes METAR aviation weather reports and serves them as human-readable text.
//!
//! The core is a pure, synchronous decoder: a report is split into tokens and
//! a fixed sequence of group decoders (station, time, wind, visibility, runway
//! visual range, weather, sky, temperature, pressure) runs over them. The
//! decoded [`Report`] is then rendered into an ordered map of prose strings.
//!
//! ```
//! let rendered = metar_info::decode(
//!     "METAR KJFK 151951Z 18010KT 10SM FEW250 24/18 A3000",
//!     Some("2024/01/15 19:51"),
//! )
//! .unwrap();
//! assert_eq!(rendered.get("wind"), Some("from 180 degree at 10 knots"));
//! ```
//!
//! ## Architecture
//!
//! - **Decoder**: tokenizer, group decoders and the [`Report`] model
//! - **Renderer**: report groups to human-readable text
//! - **Service**: upstream fetch, read-through cache and the HTTP API

pub mod cache;
pub mod config;
pub mod decoder;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod state;

pub use config::Config;
pub use decoder::{decode, decode_report};
pub use error::{MetarError, Result};
pub use logging::{create_http_trace_layer, generate_request_id, init_tracing, log_request_error};
pub use model::Report;
pub use render::{render, RenderedReport};
pub use state::AppState;
