use crate::storage::ObjectStream;
use serde::Serialize;

/// Object metadata exactly as reported by the store; fields the store
/// omitted stay `None`.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    pub key: String,
    pub size: Option<u64>,
    pub etag: Option<String>,
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// A listed file, normalized for the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub key: String,
    pub last_modified: chrono::DateTime<chrono::Utc>,
    pub size: u64,
    pub etag: String,
}

/// JSON body of `GET /api/file/list`
#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<StoredFile>,
    pub count: usize,
}

impl From<Vec<StoredFile>> for FileListResponse {
    fn from(files: Vec<StoredFile>) -> Self {
        Self {
            count: files.len(),
            files,
        }
    }
}

/// An open object body ready to be proxied to the client
pub struct FileStream {
    pub body: ObjectStream,
    pub content_type: &'static str,
    pub content_length: Option<u64>,
    pub file_name: String,
    pub cache_max_age: u64,
}

impl FileStream {
    pub fn content_disposition(&self) -> String {
        format!("inline; filename=\"{}\"", header_safe_file_name(&self.file_name))
    }

    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age)
    }
}

impl std::fmt::Debug for FileStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStream")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .field("file_name", &self.file_name)
            .field("cache_max_age", &self.cache_max_age)
            .finish_non_exhaustive()
    }
}

/// Header values only carry visible ASCII; anything else (and the quote that
/// would end the parameter) becomes `_`.
fn header_safe_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe.trim().is_empty() {
        "download.pdf".to_string()
    } else {
        safe
    }
}
