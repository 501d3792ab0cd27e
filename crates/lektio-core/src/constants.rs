//! Design-level constants for the upload pipeline.

/// Pre-flight ceiling on a selected file's size. Selections above this are
/// rejected before any record is created or any network activity occurs.
pub const MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Default anonymous file-hosting endpoint the pipeline posts to.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://catbox.moe/user/api.php";

/// Multipart field that identifies the request as a file upload to the host.
pub const UPLOAD_REQTYPE_FIELD: &str = "reqtype";
pub const UPLOAD_REQTYPE_VALUE: &str = "fileupload";

/// Multipart field carrying the binary payload.
pub const UPLOAD_FILE_FIELD: &str = "fileToUpload";

/// Default interval between progress callbacks for the queued transport.
pub const DEFAULT_QUEUE_PROGRESS_INTERVAL_MS: u64 = 500;
