//! Webhook listener that posts task events to an external endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use reqwest::Client;
use serde_json::{Value, json};

use crate::task::{
    domain::TaskEvent,
    ports::{TaskEventListener, TaskListenerError},
};

/// Connection settings for [`WebhookListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    /// Endpoint receiving `POST` requests.
    pub url: String,
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum time for the whole request.
    pub request_timeout: Duration,
}

/// Posts every task event as JSON to a configured URL.
pub struct WebhookListener<C: Clock> {
    url: String,
    client: Client,
    clock: Arc<C>,
}

impl<C: Clock> WebhookListener<C> {
    /// Creates a listener, or `Ok(None)` when the URL is blank.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] when the HTTP client cannot
    /// be built.
    pub fn new(settings: &WebhookSettings, clock: Arc<C>) -> Result<Option<Self>, reqwest::Error> {
        let url = settings.url.trim();
        if url.is_empty() {
            return Ok(None);
        }
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Some(Self {
            url: url.to_owned(),
            client,
            clock,
        }))
    }
}

/// Builds the JSON body posted for an event observed at `at`.
#[must_use]
pub fn webhook_body(event: &TaskEvent, at: DateTime<Utc>) -> Value {
    let payload = match event {
        TaskEvent::TaskCreated { task_id, actor } | TaskEvent::TaskDeleted { task_id, actor } => {
            json!({ "taskId": task_id, "actor": actor })
        }
        TaskEvent::TaskUpdated {
            task_id,
            actor,
            from_status,
            to_status,
        } => json!({
            "taskId": task_id,
            "actor": actor,
            "from": from_status,
            "to": to_status,
        }),
    };
    json!({
        "type": event.kind(),
        "at": at.to_rfc3339_opts(SecondsFormat::Millis, true),
        "payload": payload,
    })
}

#[async_trait]
impl<C: Clock + Send + Sync + 'static> TaskEventListener for WebhookListener<C> {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn on_event(&self, event: &TaskEvent) -> Result<(), TaskListenerError> {
        let body = webhook_body(event, self.clock.utc());
        self.client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| TaskListenerError::Delivery(err.to_string()))?;
        Ok(())
    }
}
