//! Farm Advisor - crop recommendations and advisory services for farmers
//!
//! The core is the crop recommendation engine in [`advisory`]: a read-only
//! agronomic dataset, a profile normalizer, a soil availability check, an
//! exact matcher, and a diagnostic builder. Around it sit the farmer profile
//! store, the weather and chat proxies, and the HTTP API that wires them
//! together.

pub mod advisory;
pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod profile;
pub mod weather;
