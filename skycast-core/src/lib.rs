//! Core library for the `skycast` weather lookup tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The query controller and its display-state machine
//! - The parse-and-validate boundary between the provider's loose JSON
//!   and the strict snapshot the presentation layer renders
//! - Abstraction over the upstream weather provider
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod normalize;
pub mod payload;
pub mod provider;

pub use config::Config;
pub use controller::{DisplayState, QueryController, lookup};
pub use error::{LOOKUP_FAILED_MESSAGE, LookupError};
pub use model::{
    ConditionCategory, CurrentConditions, FetchOptions, ForecastEntry, ForecastMode,
    LocationInfo, WeatherSnapshot,
};
pub use normalize::normalize;
pub use payload::RawPayload;
pub use provider::{WeatherProvider, provider_from_config};
