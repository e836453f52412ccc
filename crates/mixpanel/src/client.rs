//! Mixpanel client implementation.

use crate::config::{Config, MixpanelBuilder};
use crate::payload::{self, Target};
use crate::transport::{Endpoint, HttpTransport};
use crate::types::{Event, ProfileUpdate};
use crate::Error;
use tracing::instrument;

/// Mixpanel ingestion client.
///
/// Every call is one HTTP round trip; nothing is queued or retried.
/// The client is cheap to clone and can be shared across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use mixpanel::{Event, Mixpanel, ProfileUpdate};
///
/// #[tokio::main]
/// async fn main() -> Result<(), mixpanel::Error> {
///     let client = Mixpanel::new("project_token")?;
///
///     client
///         .track("user_42", "signup", Event::new().property("plan", "pro"))
///         .await?;
///
///     client
///         .update_user("user_42", ProfileUpdate::set().property("$name", "Ada"))
///         .await?;
///
///     client.alias("user_42", "ada@example.com").await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Mixpanel {
    config: Config,
    transport: HttpTransport,
}

impl Mixpanel {
    /// Create a client for the default endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        MixpanelBuilder::new(token).build()
    }

    /// Create a new builder with the given project token.
    pub fn builder(token: impl Into<String>) -> MixpanelBuilder {
        MixpanelBuilder::new(token)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ============================================
    // EVENTS
    // ============================================

    /// Record an event for `distinct_id`.
    ///
    /// Event properties are merged over `token`, `distinct_id`, `ip` and
    /// `time`, so a custom property with one of those names wins.
    #[instrument(skip(self, event))]
    pub async fn track(
        &self,
        distinct_id: &str,
        event_name: &str,
        event: Event,
    ) -> Result<(), Error> {
        let request = payload::track(self.config.token(), distinct_id, event_name, event);
        self.transport.submit(Endpoint::Track, &request).await
    }

    /// Link `new_id` to the existing `distinct_id`.
    #[instrument(skip(self))]
    pub async fn alias(&self, distinct_id: &str, new_id: &str) -> Result<(), Error> {
        let request = payload::alias(self.config.token(), distinct_id, new_id);
        self.transport.submit(Endpoint::Track, &request).await
    }

    // ============================================
    // USER PROFILES
    // ============================================

    /// Apply an update to a user profile.
    #[instrument(skip(self, update), fields(operation = %update.operation))]
    pub async fn update_user(
        &self,
        distinct_id: &str,
        update: ProfileUpdate,
    ) -> Result<(), Error> {
        self.keyed(Endpoint::Engage, Target::User { distinct_id }, update)
            .await
    }

    /// Apply a union update to a user profile.
    ///
    /// Only the operation and its properties are sent; the update's IP and
    /// time are not forwarded.
    #[instrument(skip(self, update), fields(operation = %update.operation))]
    pub async fn union_user(
        &self,
        distinct_id: &str,
        update: ProfileUpdate,
    ) -> Result<(), Error> {
        self.keyed(
            Endpoint::EngageUnion,
            Target::User { distinct_id },
            payload::without_metadata(update),
        )
        .await
    }

    // ============================================
    // GROUP PROFILES
    // ============================================

    /// Apply an update to the group profile `group_key`/`group_id`.
    #[instrument(skip(self, update), fields(operation = %update.operation))]
    pub async fn update_group(
        &self,
        group_key: &str,
        group_id: &str,
        update: ProfileUpdate,
    ) -> Result<(), Error> {
        self.keyed(
            Endpoint::Groups,
            Target::Group {
                key: group_key,
                id: group_id,
            },
            payload::without_metadata(update),
        )
        .await
    }

    /// Apply a union update to the group profile `group_key`/`group_id`.
    #[instrument(skip(self, update), fields(operation = %update.operation))]
    pub async fn union_group(
        &self,
        group_key: &str,
        group_id: &str,
        update: ProfileUpdate,
    ) -> Result<(), Error> {
        self.keyed(
            Endpoint::GroupsUnion,
            Target::Group {
                key: group_key,
                id: group_id,
            },
            payload::without_metadata(update),
        )
        .await
    }

    // ============================================
    // INTERNAL
    // ============================================

    async fn keyed(
        &self,
        endpoint: Endpoint,
        target: Target<'_>,
        update: ProfileUpdate,
    ) -> Result<(), Error> {
        let request = payload::keyed_update(self.config.token(), target, update);
        self.transport.submit(endpoint, &request).await
    }
}

impl MixpanelBuilder {
    /// Build the Mixpanel client.
    pub fn build(self) -> Result<Mixpanel, Error> {
        let config = self.build_config()?;
        let transport = HttpTransport::new(&config, self)?;
        Ok(Mixpanel { config, transport })
    }
}
