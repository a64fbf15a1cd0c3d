//! zendflow Zend Server API client
//!
//! Blocking client for the Zend Server web API: signed requests, typed XML
//! responses and poll-until-done waits for asynchronous server operations.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 ZendClient                    │
//! │   api::{application, vhost, configuration,    │
//! │         server, cluster, library, jobqueue}   │
//! └──────┬──────────────┬──────────────┬──────────┘
//!        │              │              │
//! ┌──────▼──────┐ ┌─────▼──────┐ ┌─────▼──────┐
//! │   signer    │ │  response  │ │   poller   │
//! │ HMAC-SHA256 │ │ XML decode │ │ until(..)  │
//! └──────┬──────┘ └────────────┘ └────────────┘
//!        │
//! ┌──────▼──────┐
//! │   target    │
//! │ host + key  │
//! └─────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use zendflow_api::{EndpointTarget, ZendClient};
//!
//! let client = ZendClient::new(EndpointTarget::new("10.0.0.5:10081", "admin", "0a1b2c"))?;
//! for app in client.application_get_status(None)? {
//!     println!("{} {}", app.display_name(), app.status);
//! }
//! client.restart_php()?;
//! # Ok::<(), zendflow_api::ZendError>(())
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod poller;
pub mod progress;
pub mod response;
pub mod signer;
pub mod status;
pub mod target;

// Re-exports
pub use api::*;
pub use client::{API_BASE, RequestBody, ZendClient, api_path, method_path};
pub use error::{Result, ZendError};
pub use poller::{DEFAULT_POLL_INTERVAL, Poller, Sleeper, ThreadSleeper};
pub use signer::{ACCEPT_XML, SIGNATURE_HEADER, SignedRequest, compute_signature, http_date};
pub use status::{ApplicationStatus, ServerStatus, VhostStatus};
pub use target::{API_PORT, EndpointTarget};
