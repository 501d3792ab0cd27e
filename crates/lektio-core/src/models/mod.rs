pub mod file_handle;
pub mod record;

pub use file_handle::FileHandle;
pub use record::{CourseScope, MediaRecord, MediaRecordPatch, NewMediaRecord, RecordStatus};
