//! Google REST client used by the relay handlers.
//!
//! # Responsibilities
//! - Build the fixed outbound URL and query for each endpoint
//! - Attach the caller's `Authorization` header unchanged
//! - Enforce the endpoint deadline
//! - Turn any non-200 into `UpstreamError::Status` with the body preserved

use std::time::Instant;

use axum::body::Bytes;
use axum::http::{header, StatusCode};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::IgnoredAny;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::security::BearerToken;
use crate::upstream::drive::{ListFilesQuery, FILE_METADATA_FIELDS};
use crate::upstream::endpoint::Endpoint;
use crate::upstream::error::{UpstreamError, UpstreamResult};

/// Shared, immutable handle to the Google APIs.
///
/// Cloning is cheap; the connection pool is shared.
#[derive(Debug, Clone)]
pub struct GoogleClient {
    http: Client,
    drive_api_base: Url,
    userinfo_url: Url,
}

impl GoogleClient {
    /// Create a client for the configured upstream locations.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url.as_str()).map_err(UpstreamError::Client)?;
            builder = builder.proxy(proxy);
            tracing::info!(proxy = %proxy_url, "Upstream calls use explicit proxy");
        } else if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            drive_api_base: parse_url(&config.drive_api_base)?,
            userinfo_url: parse_url(&config.userinfo_url)?,
        })
    }

    /// `GET userinfo`; returns the JSON body as received.
    pub async fn userinfo(&self, token: &BearerToken) -> UpstreamResult<Bytes> {
        let endpoint = Endpoint::UserInfo;
        let request = self.http.get(self.userinfo_url.clone());
        let response = self.send(endpoint, token, request).await?;
        read_json(endpoint, response).await
    }

    /// `GET files` with the list projection; returns the JSON body as received.
    pub async fn list_files(
        &self,
        token: &BearerToken,
        query: &ListFilesQuery,
    ) -> UpstreamResult<Bytes> {
        let endpoint = Endpoint::ListFiles;
        let request = self
            .http
            .get(self.files_url(None)?)
            .query(&query.upstream_params());
        let response = self.send(endpoint, token, request).await?;
        read_json(endpoint, response).await
    }

    /// `GET files/{id}` with the metadata projection.
    pub async fn file_metadata(&self, token: &BearerToken, file_id: &str) -> UpstreamResult<Bytes> {
        let endpoint = Endpoint::FileMetadata;
        let request = self
            .http
            .get(self.files_url(Some(file_id))?)
            .query(&[("fields", FILE_METADATA_FIELDS)]);
        let response = self.send(endpoint, token, request).await?;
        read_json(endpoint, response).await
    }

    /// `GET files/{id}?alt=media`.
    ///
    /// Returns the 200 response unread so the caller can stream the body.
    /// Google-native documents (Docs, Sheets, Slides) need `files.export`
    /// instead; Google's error for them is relayed like any other.
    pub async fn download(&self, token: &BearerToken, file_id: &str) -> UpstreamResult<Response> {
        let endpoint = Endpoint::Download;
        let request = self
            .http
            .get(self.files_url(Some(file_id))?)
            .query(&[("alt", "media")]);
        self.send(endpoint, token, request).await
    }

    /// `{drive}/files` or `{drive}/files/{id}`, with `id` escaped as one segment.
    fn files_url(&self, file_id: Option<&str>) -> UpstreamResult<Url> {
        // `url` drops dot segments on push, which would turn the call into files.list.
        if let Some(id @ ("." | "..")) = file_id {
            return Err(UpstreamError::InvalidFileId(id.to_string()));
        }
        let mut url = self.drive_api_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::InvalidUrl(self.drive_api_base.to_string()))?;
            segments.pop_if_empty().push("files");
            if let Some(id) = file_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Issue the single attempt and gate on status 200.
    async fn send(
        &self,
        endpoint: Endpoint,
        token: &BearerToken,
        request: RequestBuilder,
    ) -> UpstreamResult<Response> {
        let start = Instant::now();
        let result = authorize(endpoint, token, request).send().await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let err = UpstreamError::from_reqwest(endpoint, e);
                metrics::record_upstream(endpoint, "error", start);
                tracing::warn!(endpoint = %endpoint, error = %err, "Upstream call failed");
                return Err(err);
            }
        };

        let status = response.status();
        metrics::record_upstream(endpoint, status.as_str(), start);
        tracing::debug!(
            endpoint = %endpoint,
            status = %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        if status != StatusCode::OK {
            let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
            let body = response
                .bytes()
                .await
                .map_err(|e| UpstreamError::from_reqwest(endpoint, e))?;
            tracing::warn!(endpoint = %endpoint, status = %status, "Relaying upstream error");
            return Err(UpstreamError::Status {
                endpoint,
                status,
                body,
                content_type,
            });
        }

        Ok(response)
    }
}

/// Attach the caller's token and the endpoint deadline.
fn authorize(endpoint: Endpoint, token: &BearerToken, request: RequestBuilder) -> RequestBuilder {
    request
        .header(header::AUTHORIZATION, token.header_value().clone())
        .timeout(endpoint.timeout())
}

fn parse_url(value: &str) -> UpstreamResult<Url> {
    Url::parse(value).map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", value, e)))
}

/// Read a 200 body and check it is JSON without re-encoding it.
async fn read_json(endpoint: Endpoint, response: Response) -> UpstreamResult<Bytes> {
    let body = response
        .bytes()
        .await
        .map_err(|e| UpstreamError::from_reqwest(endpoint, e))?;
    serde_json::from_slice::<IgnoredAny>(&body)
        .map_err(|source| UpstreamError::InvalidJson { endpoint, source })?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(drive_api_base: &str) -> GoogleClient {
        GoogleClient::new(&UpstreamConfig {
            drive_api_base: drive_api_base.to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_files_url() {
        let google = client("https://www.googleapis.com/drive/v3");
        assert_eq!(
            google.files_url(None).unwrap().as_str(),
            "https://www.googleapis.com/drive/v3/files"
        );
        assert_eq!(
            google.files_url(Some("1AbC_xyz")).unwrap().as_str(),
            "https://www.googleapis.com/drive/v3/files/1AbC_xyz"
        );
    }

    #[test]
    fn test_files_url_trailing_slash_base() {
        let google = client("http://127.0.0.1:9000/drive/v3/");
        assert_eq!(
            google.files_url(Some("abc")).unwrap().as_str(),
            "http://127.0.0.1:9000/drive/v3/files/abc"
        );
    }

    #[test]
    fn test_file_id_is_one_segment() {
        let google = client("https://www.googleapis.com/drive/v3");
        let url = google.files_url(Some("a/../b?c")).unwrap();
        assert_eq!(url.path(), "/drive/v3/files/a%2F..%2Fb%3Fc");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_dot_file_ids_rejected() {
        let google = client("https://www.googleapis.com/drive/v3");
        for id in [".", ".."] {
            let err = google.files_url(Some(id)).unwrap_err();
            assert!(matches!(err, UpstreamError::InvalidFileId(ref v) if v == id));
        }
        assert_eq!(
            google.files_url(Some("...")).unwrap().path(),
            "/drive/v3/files/..."
        );
    }

    #[test]
    fn test_request_carries_endpoint_deadline() {
        let google = client("https://www.googleapis.com/drive/v3");
        let token = BearerToken::from_headers(&{
            let mut headers = axum::http::HeaderMap::new();
            headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
            headers
        })
        .unwrap();

        for endpoint in [
            Endpoint::UserInfo,
            Endpoint::ListFiles,
            Endpoint::FileMetadata,
            Endpoint::Download,
        ] {
            let builder = google.http.get(google.files_url(None).unwrap());
            let request = authorize(endpoint, &token, builder).build().unwrap();
            assert_eq!(request.timeout(), Some(&endpoint.timeout()));
            assert_eq!(request.headers()[header::AUTHORIZATION], "Bearer abc");
        }
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let err = GoogleClient::new(&UpstreamConfig {
            userinfo_url: "not a url".into(),
            ..UpstreamConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidUrl(_)));
    }
}
