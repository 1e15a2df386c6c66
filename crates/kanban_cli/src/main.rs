//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `kanban_core` linkage and wiring outside any UI host.
//! - Seed the sample board, run one drag-and-drop move and print derived
//!   views as deterministic `key=value` lines.
//!
//! Environment: `KANBAN_LOG_DIR` (absolute, enables file logging),
//! `KANBAN_LOG_LEVEL`, `KANBAN_DB` (database file; in-memory when unset).

use chrono::Utc;
use kanban_core::db::{open_db, open_db_in_memory};
use kanban_core::fixtures::{sample_board, sample_users};
use kanban_core::{
    board_stats_at, default_log_level, init_logging, BoardStore, NoopSyncProvider, Priority,
    SqlitePreferenceStore, SyncRegistry, TaskMove, ThemeService, UserStore,
};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("KANBAN_LOG_DIR") {
        let level = std::env::var("KANBAN_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    println!("kanban_core ping={}", kanban_core::ping());
    println!("kanban_core version={}", kanban_core::core_version());

    let conn = match std::env::var("KANBAN_DB") {
        Ok(path) => open_db(path)?,
        Err(_) => open_db_in_memory()?,
    };
    let theme = ThemeService::load(SqlitePreferenceStore::new(&conn), None)?;
    println!("theme={}", theme.mode());

    let now = Utc::now();
    let mut users = UserStore::with_users(sample_users());
    let first_user = users.users().first().map(|user| user.id);
    users.set_current_user(first_user);

    let board = sample_board(now, users.users());
    let board_id = board.id;
    let mut boards = BoardStore::new();
    boards.add_board(board)?;
    boards.set_current_board(Some(board_id));

    // Drag the first "To Do" card to the top of "In Progress".
    if let Some(request) = first_todo_move(&boards) {
        boards.move_task(board_id, request)?;
    }

    let mut sync = SyncRegistry::new();
    sync.register(Arc::new(NoopSyncProvider::new()))?;
    sync.select_active("noop")?;

    let current = boards
        .current_board()
        .ok_or("sample board missing after seeding")?;
    sync.push_board_update(current)?;

    let stats = board_stats_at(current, now);
    println!("board={} consistent={}", current.title, current.is_consistent());
    println!("tasks.total={}", stats.total_tasks);
    for priority in Priority::ALL {
        println!(
            "tasks.priority.{}={}",
            priority.as_str(),
            stats.priority_counts.get(priority)
        );
    }
    for column in &current.columns {
        println!("column.{}={}", column.title, column.task_ids.len());
    }
    println!("tasks.overdue={}", stats.due_dates.overdue);
    println!("tasks.upcoming={}", stats.due_dates.upcoming);
    println!("tasks.other={}", stats.due_dates.other);
    if let Some(user) = users.current_user() {
        println!("user.current={}", user.name);
    }

    Ok(())
}

fn first_todo_move(boards: &BoardStore) -> Option<TaskMove> {
    let board = boards.current_board()?;
    let source = board.columns.first()?;
    let destination = board.columns.get(1)?;
    Some(TaskMove {
        task_id: *source.task_ids.first()?,
        source_column_id: source.id,
        destination_column_id: destination.id,
        source_index: 0,
        destination_index: 0,
    })
}
