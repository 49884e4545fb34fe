//! HTTP snippet store client.
//!
//! Talks to the knowledge base's snippet API:
//! - `GET  {base}/api/head/snippet.json?project_id={id}` - full listing
//! - `POST {base}/api/head/snippet.json` - create
//! - `PUT  {base}/api/head/snippet/{id}.json` - update
//!
//! Every request authenticates with HTTP basic auth, API key as the username
//! and a fixed placeholder password. Non-2xx responses surface as
//! `StoreError::Status` with the response body as diagnostic text. Calls are
//! single-attempt; retrying is the operator's job.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snipsync_core::entity::{Snippet, SnippetListing};
use snipsync_core::store::{Result, SnippetStore, StoreError};

/// The service only checks the username half of the credential pair.
const BASIC_AUTH_PASSWORD: &str = "X";

/// Snippet store backed by the remote HTTP API.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/head/snippet.json", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/api/head/snippet/{}.json", self.base_url, id)
    }

    /// Send a request and return the response body, mapping transport
    /// failures and non-2xx statuses to store errors.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request
            .basic_auth(&self.api_key, Some(BASIC_AUTH_PASSWORD))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

/// Body shape shared by create and update uploads.
#[derive(Debug, Serialize)]
struct SnippetPayload<'a> {
    project_id: &'a str,
    name: &'a str,
    mergecode: &'a str,
    description: &'a str,
    visibility: &'a str,
    reader_roles: &'a str,
    status: &'a str,
    current_version: VersionPayload<'a>,
}

#[derive(Debug, Serialize)]
struct VersionPayload<'a> {
    en: &'a str,
}

impl<'a> SnippetPayload<'a> {
    fn new(project_id: &'a str, mergecode: &'a str, content: &'a str) -> Self {
        Self {
            project_id,
            name: mergecode,
            mergecode,
            description: "Created by snipsync",
            visibility: "public",
            reader_roles: "false",
            status: "active",
            current_version: VersionPayload { en: content },
        }
    }
}

/// Envelope around a single created record.
#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    #[serde(default)]
    data: Snippet,
}

#[async_trait]
impl SnippetStore for HttpStore {
    async fn list(&self, project_id: &str) -> Result<Vec<Snippet>> {
        let request = self
            .client
            .get(self.collection_url())
            .query(&[("project_id", project_id)]);

        let body = self.execute(request).await?;
        let listing: SnippetListing =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(listing.data)
    }

    async fn create(&self, project_id: &str, mergecode: &str, content: &str) -> Result<Snippet> {
        let payload = SnippetPayload::new(project_id, mergecode, content);
        let request = self.client.post(self.collection_url()).json(&payload);

        let body = self.execute(request).await?;
        let envelope: RecordEnvelope =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn update(&self, snippet: &Snippet, content: &str) -> Result<()> {
        let payload = SnippetPayload::new(&snippet.project_id, &snippet.mergecode, content);
        let request = self.client.put(self.record_url(&snippet.id)).json(&payload);

        // Only the status matters; the echoed record is ignored.
        self.execute(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = SnippetPayload::new("P", "intro", "<p>Hi</p>");
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "project_id": "P",
                "name": "intro",
                "mergecode": "intro",
                "description": "Created by snipsync",
                "visibility": "public",
                "reader_roles": "false",
                "status": "active",
                "current_version": { "en": "<p>Hi</p>" }
            })
        );
    }

    #[test]
    fn test_urls() {
        let store = HttpStore::new("https://kb.example.com", "key").unwrap();
        assert_eq!(
            store.collection_url(),
            "https://kb.example.com/api/head/snippet.json"
        );
        assert_eq!(
            store.record_url("42"),
            "https://kb.example.com/api/head/snippet/42.json"
        );
    }
}
