//! Drive v3 query shaping.

use serde::{Deserialize, Serialize};

/// `fields` projection sent with `files.list`.
pub const LIST_FILES_FIELDS: &str =
    "files(id,name,mimeType,modifiedTime,owners(displayName,emailAddress)),nextPageToken";

/// `fields` projection sent with `files.get`.
pub const FILE_METADATA_FIELDS: &str = "id,name,mimeType,size,modifiedTime,owners,webViewLink";

/// Page size used when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Query accepted by the list endpoint, named as Drive names them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Drive search expression, e.g. `name contains 'report'`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Continuation token from a previous page's `nextPageToken`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListFilesQuery {
    fn default() -> Self {
        Self {
            q: None,
            page_token: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListFilesQuery {
    /// Outbound `files.list` query parameters.
    ///
    /// Empty `q` / `pageToken` values are dropped.
    pub fn upstream_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageSize", self.page_size.to_string()),
            ("fields", LIST_FILES_FIELDS.to_string()),
        ];
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            params.push(("q", q.to_string()));
        }
        if let Some(token) = self.page_token.as_deref().filter(|t| !t.is_empty()) {
            params.push(("pageToken", token.to_string()));
        }
        params
    }
}
