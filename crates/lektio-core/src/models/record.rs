use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

/// Persisted lifecycle of a media record.
///
/// `Ready` and `Error` are terminal from this subsystem's point of view; a
/// stuck record requires caller-driven remediation (re-issuing a fresh
/// record), which is out of scope here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Ready,
    Uploading,
    Error,
}

impl RecordStatus {
    /// Whether the upload pipeline takes any further automatic action on a
    /// record in this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordStatus::Ready | RecordStatus::Error)
    }

    /// Validates a lifecycle transition. Only `uploading -> ready` and
    /// `uploading -> error` exist; there is no automatic way back into
    /// `uploading` or out of `error`.
    pub fn can_transition_to(&self, next: RecordStatus) -> bool {
        matches!(
            (self, next),
            (RecordStatus::Uploading, RecordStatus::Ready)
                | (RecordStatus::Uploading, RecordStatus::Error)
        )
    }
}

impl Display for RecordStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordStatus::Ready => write!(f, "ready"),
            RecordStatus::Uploading => write!(f, "uploading"),
            RecordStatus::Error => write!(f, "error"),
        }
    }
}

impl FromStr for RecordStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ready" => Ok(RecordStatus::Ready),
            "uploading" => Ok(RecordStatus::Uploading),
            "error" => Ok(RecordStatus::Error),
            _ => Err(anyhow::anyhow!("Invalid record status: {}", s)),
        }
    }
}

/// Course visibility of a lesson video: the whole center or one course.
///
/// Serialized as `"all"` or the course id string, matching what the platform
/// stores in the record's `course_scope` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "String", try_from = "String")]
pub enum CourseScope {
    AllCourses,
    Course(Uuid),
}

impl From<CourseScope> for String {
    fn from(scope: CourseScope) -> Self {
        match scope {
            CourseScope::AllCourses => "all".to_string(),
            CourseScope::Course(id) => id.to_string(),
        }
    }
}

impl TryFrom<String> for CourseScope {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "all" {
            return Ok(CourseScope::AllCourses);
        }
        let id = Uuid::parse_str(&value)
            .map_err(|e| anyhow::anyhow!("Invalid course scope '{}': {}", value, e))?;
        Ok(CourseScope::Course(id))
    }
}

/// One lesson-media item and its transfer lifecycle.
///
/// Created by the caller via the metadata store before the orchestrator
/// starts; afterwards only the orchestrator mutates it (status, url,
/// error_detail). Deletion belongs to an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub course_scope: CourseScope,
    pub author: String,
    pub status: RecordStatus,
    /// Empty or a playable remote URL; authoritative only when `status` is
    /// `ready`. Consumers must ignore it while `uploading`.
    pub url: String,
    /// Free-text diagnostic, present only when `status` is `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MediaRecord {
    /// Materialize a record from creation fields with a store-assigned id.
    pub fn create(id: Uuid, fields: NewMediaRecord) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: fields.title,
            description: fields.description,
            course_scope: fields.course_scope,
            author: fields.author,
            status: fields.status,
            url: fields.url,
            error_detail: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a lifecycle patch, validating the transition.
    pub fn apply(&mut self, patch: MediaRecordPatch) -> Result<(), AppError> {
        if !self.status.can_transition_to(patch.status) {
            return Err(AppError::InvalidStatusTransition {
                from: self.status,
                to: patch.status,
            });
        }
        self.status = patch.status;
        if let Some(url) = patch.url {
            self.url = url;
        }
        self.error_detail = patch.error_detail;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Creation fields handed to the metadata store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMediaRecord {
    pub title: String,
    pub description: String,
    pub course_scope: CourseScope,
    pub author: String,
    pub status: RecordStatus,
    pub url: String,
}

impl NewMediaRecord {
    /// A record usable immediately: the URL was supplied directly and the
    /// upload pipeline is skipped entirely.
    pub fn ready(
        title: impl Into<String>,
        description: impl Into<String>,
        course_scope: CourseScope,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            course_scope,
            author: author.into(),
            status: RecordStatus::Ready,
            url: url.into(),
        }
    }

    /// A record awaiting a background transfer; the URL stays empty until
    /// the orchestrator finalizes it.
    pub fn uploading(
        title: impl Into<String>,
        description: impl Into<String>,
        course_scope: CourseScope,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            course_scope,
            author: author.into(),
            status: RecordStatus::Uploading,
            url: String::new(),
        }
    }
}

/// Partial update written by the orchestrator when a task settles.
///
/// Constructors cover exactly the two defined transitions; no other shape of
/// patch can be expressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecordPatch {
    pub status: RecordStatus,
    pub url: Option<String>,
    pub error_detail: Option<String>,
}

impl MediaRecordPatch {
    /// `uploading -> ready`: the transfer succeeded, replace the URL and
    /// clear any diagnostic.
    pub fn ready(url: impl Into<String>) -> Self {
        Self {
            status: RecordStatus::Ready,
            url: Some(url.into()),
            error_detail: None,
        }
    }

    /// `uploading -> error`: the transfer failed, retain the diagnostic.
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            status: RecordStatus::Error,
            url: None,
            error_detail: Some(detail.into()),
        }
    }
}
