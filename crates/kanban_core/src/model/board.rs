//! Board, column and task domain model.
//!
//! # Responsibility
//! - Define the nested board -> column -> task shape rendered by the UI.
//! - Provide read-only lookups used by stores and derived views.
//!
//! # Invariants
//! - Every id in a column's `task_ids` exists as a key in `Board::tasks`.
//! - A task id appears in at most one column at a time.
//! - Column order and `task_ids` order are display order.

use crate::model::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

pub type TagId = Uuid;
pub type TaskId = Uuid;
pub type ColumnId = Uuid;
pub type BoardId = Uuid;
pub type CommentId = Uuid;

/// Task urgency shown as a colored badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Colored label. Copied by value into the task that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Free-form remark left by a user on one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub user_id: UserId,
    pub task_id: TaskId,
    pub created_at: DateTime<Utc>,
}

/// Unit of work placed on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    /// Ordered; tag ids are unique within one task.
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

impl Task {
    /// Creates a task with empty description, no due date, no assignee and no tags.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            priority,
            due_date: None,
            created_at: now,
            updated_at: now,
            assignee_id: None,
            tags: Vec::new(),
            attachments: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Copies `tag` into this task.
    ///
    /// A tag with the same id is replaced in place so ids stay unique and the
    /// original position is kept.
    pub fn attach_tag(&mut self, tag: &Tag) {
        match self.tags.iter_mut().find(|existing| existing.id == tag.id) {
            Some(existing) => *existing = tag.clone(),
            None => self.tags.push(tag.clone()),
        }
    }

    /// Removes the tag with `tag_id`. Returns whether a tag was removed.
    pub fn detach_tag(&mut self, tag_id: TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|tag| tag.id != tag_id);
        self.tags.len() != before
    }

    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assignee_id == Some(user_id)
    }
}

/// Ordered lane of task references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub task_ids: Vec<TaskId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    /// Creates an empty column.
    pub fn new(id: ColumnId, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        self.task_ids.contains(&task_id)
    }
}

/// One kanban workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub columns: Vec<Column>,
    pub tasks: BTreeMap<TaskId, Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Breach of the board's referential invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// A column references a task id missing from the task map.
    DanglingTaskRef { column_id: ColumnId, task_id: TaskId },
    /// A task id is referenced more than once across all columns.
    DuplicateTaskRef { task_id: TaskId, occurrences: usize },
}

impl Board {
    /// Creates a board with no columns and no tasks.
    pub fn new(id: BoardId, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            columns: Vec::new(),
            tasks: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    pub(crate) fn column_mut(&mut self, column_id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id == column_id)
    }

    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.get(&task_id)
    }

    /// Returns the tasks of one column in display order.
    ///
    /// Ids without a task entry are skipped. Returns `None` for an unknown column.
    pub fn column_tasks(&self, column_id: ColumnId) -> Option<Vec<&Task>> {
        let column = self.column(column_id)?;
        Some(
            column
                .task_ids
                .iter()
                .filter_map(|task_id| self.tasks.get(task_id))
                .collect(),
        )
    }

    /// Returns the first column that references `task_id`.
    pub fn task_column(&self, task_id: TaskId) -> Option<&Column> {
        self.columns.iter().find(|column| column.contains(task_id))
    }

    /// Lists every referential breach; empty when the board is consistent.
    pub fn integrity_violations(&self) -> Vec<IntegrityViolation> {
        let mut violations = Vec::new();
        let mut occurrences: HashMap<TaskId, usize> = HashMap::new();

        for column in &self.columns {
            for task_id in &column.task_ids {
                *occurrences.entry(*task_id).or_default() += 1;
                if !self.tasks.contains_key(task_id) {
                    violations.push(IntegrityViolation::DanglingTaskRef {
                        column_id: column.id,
                        task_id: *task_id,
                    });
                }
            }
        }

        let mut duplicates: Vec<_> = occurrences
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .collect();
        duplicates.sort();
        violations.extend(duplicates.into_iter().map(|(task_id, occurrences)| {
            IntegrityViolation::DuplicateTaskRef {
                task_id,
                occurrences,
            }
        }));

        violations
    }

    pub fn is_consistent(&self) -> bool {
        self.integrity_violations().is_empty()
    }
}
