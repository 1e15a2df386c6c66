//! Task counts for the analytics dashboard.
//!
//! # Responsibility
//! - Count tasks by priority, by column and by due-date window.
//!
//! # Invariants
//! - `*_at` functions are pure in `now`; the plain variants read the clock
//!   once per call.
//! - Column counts are keyed by title: columns sharing a title collapse into
//!   one entry holding the last column's count.
//! - Overdue and upcoming windows are disjoint.

use crate::model::board::{Board, Priority, Task};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Length of the upcoming window counted from `now`.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Task count per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }

    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::High => self.high += 1,
        }
    }
}

/// Due-date chart segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateBreakdown {
    pub overdue: usize,
    pub upcoming: usize,
    /// `total - overdue - upcoming`; signed and not clamped.
    pub other: i64,
}

/// Full dashboard snapshot for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total_tasks: usize,
    pub total_columns: usize,
    pub priority_counts: PriorityCounts,
    pub column_counts: BTreeMap<String, usize>,
    pub due_dates: DueDateBreakdown,
}

pub fn priority_distribution(board: &Board) -> PriorityCounts {
    board
        .tasks
        .values()
        .fold(PriorityCounts::default(), |mut counts, task| {
            counts.bump(task.priority);
            counts
        })
}

/// Number of task references per column, keyed by column title.
pub fn column_distribution(board: &Board) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for column in &board.columns {
        counts.insert(column.title.clone(), column.task_ids.len());
    }
    counts
}

pub fn is_overdue_at(task: &Task, now: DateTime<Utc>) -> bool {
    task.due_date.is_some_and(|due| due < now)
}

/// Due within `[now, now + 7 days]`, both ends inclusive.
pub fn is_upcoming_at(task: &Task, now: DateTime<Utc>) -> bool {
    let deadline = now + Duration::days(UPCOMING_WINDOW_DAYS);
    task.due_date.is_some_and(|due| due >= now && due <= deadline)
}

pub fn overdue_count_at(board: &Board, now: DateTime<Utc>) -> usize {
    board
        .tasks
        .values()
        .filter(|task| is_overdue_at(task, now))
        .count()
}

pub fn upcoming_count_at(board: &Board, now: DateTime<Utc>) -> usize {
    board
        .tasks
        .values()
        .filter(|task| is_upcoming_at(task, now))
        .count()
}

pub fn overdue_count(board: &Board) -> usize {
    overdue_count_at(board, Utc::now())
}

pub fn upcoming_count(board: &Board) -> usize {
    upcoming_count_at(board, Utc::now())
}

pub fn due_date_breakdown_at(board: &Board, now: DateTime<Utc>) -> DueDateBreakdown {
    let overdue = overdue_count_at(board, now);
    let upcoming = upcoming_count_at(board, now);
    DueDateBreakdown {
        overdue,
        upcoming,
        other: board.tasks.len() as i64 - overdue as i64 - upcoming as i64,
    }
}

pub fn board_stats_at(board: &Board, now: DateTime<Utc>) -> BoardStats {
    BoardStats {
        total_tasks: board.tasks.len(),
        total_columns: board.columns.len(),
        priority_counts: priority_distribution(board),
        column_counts: column_distribution(board),
        due_dates: due_date_breakdown_at(board, now),
    }
}

pub fn board_stats(board: &Board) -> BoardStats {
    board_stats_at(board, Utc::now())
}
