use serde::{Deserialize, Serialize};

use super::issue::null_as_default;

/// Attachment descriptor nested in an issue response.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    /// Usually host-relative, e.g. `/youtrack/api/files/74-12?sign=...`.
    pub url: String,
    #[serde(rename = "mimeType", default, deserialize_with = "null_as_default")]
    pub mime_type: String,
}

impl Attachment {
    /// Name safe to join onto a download directory.
    ///
    /// Path separators become `_`; names that would resolve to the directory
    /// itself or its parent fall back to `attachment`.
    pub fn file_name(&self) -> String {
        let flattened: String = self
            .name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();

        match flattened.trim() {
            "" | "." | ".." => "attachment".to_string(),
            _ => flattened,
        }
    }
}
