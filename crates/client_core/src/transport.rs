//! HTTP access to the remote agenda endpoint.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::{Contact, NewContact},
    error::ContactError,
    protocol::{decode_contact_list, AddContactAck},
};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Settings;

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn fetch_contacts(&self) -> Result<Vec<Contact>, ContactError>;
    async fn add_contact(&self, contact: &NewContact) -> Result<AddContactAck, ContactError>;
}

pub struct HttpContactApi {
    http: Client,
    endpoint: Url,
}

impl HttpContactApi {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let endpoint = settings.endpoint_url()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self { http, endpoint })
    }

    pub fn with_timeout(endpoint: Url, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn network_error(err: reqwest::Error) -> ContactError {
    if err.is_timeout() {
        ContactError::network(format!("request timed out: {err}"))
    } else {
        ContactError::network(err.to_string())
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn fetch_contacts(&self) -> Result<Vec<Contact>, ContactError> {
        debug!(endpoint = %self.endpoint, "fetching contact list");
        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %self.endpoint, status = status.as_u16(), "contact list request rejected");
            return Err(ContactError::HttpStatus {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().await.map_err(network_error)?;
        let value: Value =
            serde_json::from_str(&body).map_err(|err| ContactError::parse(err.to_string()))?;
        let contacts = decode_contact_list(value);
        info!(endpoint = %self.endpoint, count = contacts.len(), "fetched contact list");
        Ok(contacts)
    }

    async fn add_contact(&self, contact: &NewContact) -> Result<AddContactAck, ContactError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(contact)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "add contact request rejected"
            );
            return Err(ContactError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        // A success with an unreadable body still counts as added.
        let ack = match response.text().await {
            Ok(body) => AddContactAck::from_body(&body),
            Err(err) => {
                debug!(error = %err, "could not read add contact response body");
                AddContactAck::Empty
            }
        };
        info!(endpoint = %self.endpoint, status = status.as_u16(), "contact added");
        Ok(ack)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
