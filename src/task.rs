//! Task and record entities, plus their document codec.
//!
//! Tasks are stored one per markdown file; the frontmatter block carries the
//! scalar fields and the body carries the free-text content. Decoding narrows
//! the untyped frontmatter map through the typed accessors, so unknown or
//! mistyped optional fields never abort decoding of the known ones.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_yaml::Value;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::frontmatter::{self, Frontmatter};

/// A task record backed by a single markdown file.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub title: String,
    pub content: Option<String>,
    pub is_project: bool,
    pub is_high_priority: bool,
    pub done: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// Deadline, YYYY-MM-DD
    pub due_date: Option<String>,
    /// Scheduled day, YYYY-MM-DD
    pub do_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A task is completed only when both completion markers agree.
    ///
    /// `done` without `completed_at` is an inconsistent intermediate state
    /// that the lifecycle planner repairs.
    pub fn is_completed(&self) -> bool {
        self.done && self.completed_at.is_some()
    }
}

/// Archival projection of a task. Write-once; no further lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub title: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived_at: DateTime<Utc>,
}

impl Record {
    /// Build the archival record for a task being retired.
    pub fn from_task(task: &Task, archived_at: DateTime<Utc>) -> Self {
        Self {
            title: task.title.clone(),
            content: task.content.clone(),
            tags: Vec::new(),
            url: None,
            created_at: task.created_at,
            updated_at: task.updated_at,
            archived_at,
        }
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Decode a parsed document into a [`Task`].
///
/// `created_at` and `do_date` are required. `updated_at` defaults to
/// `created_at`. `done` without a valid `completed_at` decodes as-is: that
/// inconsistent state is what the lifecycle planner detects and repairs.
pub fn document_to_task(doc: &Document) -> Result<Task> {
    if doc.title.is_empty() {
        return Err(Error::MissingField("title"));
    }

    let fm = &doc.frontmatter;

    let created_at = frontmatter::get_time(fm, "created_at")
        .ok_or(Error::MissingField("created_at"))?;
    let do_date =
        frontmatter::get_string(fm, "do_date").ok_or(Error::MissingField("do_date"))?;

    let updated_at = frontmatter::get_time(fm, "updated_at").unwrap_or(created_at);

    let content = if doc.body.is_empty() {
        None
    } else {
        Some(doc.body.clone())
    };

    Ok(Task {
        title: doc.title.clone(),
        content,
        is_project: frontmatter::get_bool(fm, "is_project").unwrap_or(false),
        is_high_priority: frontmatter::get_bool(fm, "is_high_priority").unwrap_or(false),
        done: frontmatter::get_bool(fm, "done").unwrap_or(false),
        completed_at: frontmatter::get_time(fm, "completed_at"),
        due_date: frontmatter::get_string(fm, "due_date"),
        do_date,
        created_at,
        updated_at,
    })
}

/// Encode a task into its document form.
///
/// Optional fields are emitted only when present, so decoding the result
/// reconstructs the task exactly.
pub fn task_to_document(task: &Task) -> Document {
    let mut fm = Frontmatter::new();
    fm.insert("is_project".to_string(), Value::Bool(task.is_project));
    fm.insert(
        "is_high_priority".to_string(),
        Value::Bool(task.is_high_priority),
    );
    fm.insert("done".to_string(), Value::Bool(task.done));
    fm.insert("do_date".to_string(), Value::String(task.do_date.clone()));
    fm.insert(
        "created_at".to_string(),
        Value::String(format_time(task.created_at)),
    );
    fm.insert(
        "updated_at".to_string(),
        Value::String(format_time(task.updated_at)),
    );

    if let Some(completed_at) = task.completed_at {
        fm.insert(
            "completed_at".to_string(),
            Value::String(format_time(completed_at)),
        );
    }
    if let Some(due_date) = &task.due_date {
        fm.insert("due_date".to_string(), Value::String(due_date.clone()));
    }

    Document {
        title: task.title.clone(),
        frontmatter: fm,
        body: task.content.clone().unwrap_or_default(),
    }
}

/// Encode an archival record into its document form.
pub fn record_to_document(record: &Record) -> Document {
    let mut fm = Frontmatter::new();
    fm.insert(
        "tags".to_string(),
        Value::Sequence(
            record
                .tags
                .iter()
                .map(|tag| Value::String(tag.clone()))
                .collect(),
        ),
    );
    fm.insert(
        "created_at".to_string(),
        Value::String(format_time(record.created_at)),
    );
    fm.insert(
        "updated_at".to_string(),
        Value::String(format_time(record.updated_at)),
    );
    fm.insert(
        "archived_at".to_string(),
        Value::String(format_time(record.archived_at)),
    );
    if let Some(url) = &record.url {
        fm.insert("url".to_string(), Value::String(url.clone()));
    }

    Document {
        title: record.title.clone(),
        frontmatter: fm,
        body: record.content.clone().unwrap_or_default(),
    }
}
