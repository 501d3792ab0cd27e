use serde::{Deserialize, Serialize};

/// Handle to a locally selected media file, as returned by the platform's
/// file picker. The picker itself is an external collaborator; this subsystem
/// only consumes the handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileHandle {
    /// Local reference to the selected binary payload. May carry a `file://`
    /// prefix depending on the picker.
    pub uri: String,
    /// Size of the payload, used for the pre-flight size-limit check.
    pub size_bytes: u64,
}

impl FileHandle {
    pub fn new(uri: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            uri: uri.into(),
            size_bytes,
        }
    }

    /// Filesystem path for the handle, with any `file://` prefix stripped.
    pub fn local_path(&self) -> &str {
        self.uri.strip_prefix("file://").unwrap_or(&self.uri)
    }

    /// Last path segment, used as the multipart filename.
    pub fn file_name(&self) -> &str {
        let path = self.local_path();
        path.rsplit(['/', '\\']).next().unwrap_or(path)
    }
}
