pub mod api;

#[cfg(feature = "server")]
pub mod auth;

#[cfg(feature = "server")]
pub mod backend;

#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod content;

#[cfg(feature = "server")]
pub mod error_convert;

#[cfg(feature = "server")]
pub mod gateway;

#[cfg(feature = "server")]
pub mod health;

#[cfg(feature = "server")]
pub mod profile;

#[cfg(feature = "server")]
pub mod session;

#[cfg(feature = "server")]
pub mod telemetry;
