//! Mixpanel ingestion API client for Rust.
//!
//! Each call formats one event, profile update or alias into the
//! ingestion wire format and posts it straight away. A call succeeds
//! only when the API answers with the body `1`.
//!
//! # Example
//!
//! ```rust,no_run
//! use mixpanel::{Event, Mixpanel, ProfileUpdate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mixpanel::Error> {
//!     let client = Mixpanel::builder("project_token")
//!         .api_url("https://api-eu.mixpanel.com")
//!         .build()?;
//!
//!     client
//!         .track("user_42", "checkout", Event::new().property("total", 99.5))
//!         .await?;
//!
//!     client
//!         .union_group("company", "acme", ProfileUpdate::union().property("plans", vec!["pro"]))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod payload;
mod properties;
mod transport;
mod types;

pub use client::Mixpanel;
pub use config::{Config, MixpanelBuilder, DEFAULT_API_URL};
pub use error::{Error, SubmitError};
pub use properties::Properties;
pub use transport::Endpoint;
pub use types::{Event, Ip, Operation, ProfileTime, ProfileUpdate};
