//! Sample users and board for first launch, demos and tests.
//!
//! Due dates are relative to the `now` passed in, so derived views over the
//! sample board are stable for a fixed instant.

use crate::model::board::{Board, Column, Priority, Tag, Task};
use crate::model::new_id;
use crate::model::user::{User, UserRole};
use chrono::{DateTime, Duration, Utc};

/// Three users, one per role.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(new_id(), "John Doe", "john@example.com", UserRole::Admin)
            .with_avatar("https://i.pravatar.cc/150?img=1"),
        User::new(new_id(), "Jane Smith", "jane@example.com", UserRole::Editor)
            .with_avatar("https://i.pravatar.cc/150?img=5"),
        User::new(new_id(), "Bob Johnson", "bob@example.com", UserRole::Viewer)
            .with_avatar("https://i.pravatar.cc/150?img=8"),
    ]
}

struct TaskSeed {
    title: &'static str,
    description: &'static str,
    priority: Priority,
    due_in_days: i64,
    age_days: i64,
    assignee: usize,
    tags: &'static [(&'static str, &'static str)],
}

const TODO: &[TaskSeed] = &[
    TaskSeed {
        title: "Research competitor products",
        description: "Analyze top 5 competitor products and identify key features",
        priority: Priority::High,
        due_in_days: 7,
        age_days: 0,
        assignee: 0,
        tags: &[("Research", "#FF5733"), ("Marketing", "#33FFA8")],
    },
    TaskSeed {
        title: "Design new homepage layout",
        description: "Create wireframes and mockups for the new homepage design",
        priority: Priority::Medium,
        due_in_days: 5,
        age_days: 0,
        assignee: 1,
        tags: &[("Design", "#33A1FF"), ("UI/UX", "#D133FF")],
    },
    TaskSeed {
        title: "Update user documentation",
        description: "Review and update the user documentation with new features",
        priority: Priority::Low,
        due_in_days: 10,
        age_days: 0,
        assignee: 2,
        tags: &[("Documentation", "#33FF57")],
    },
];

const IN_PROGRESS: &[TaskSeed] = &[
    TaskSeed {
        title: "Implement authentication system",
        description: "Set up OAuth and JWT for the new authentication system",
        priority: Priority::High,
        due_in_days: 3,
        age_days: 0,
        assignee: 0,
        tags: &[("Development", "#FFD700"), ("Security", "#FF0000")],
    },
    TaskSeed {
        title: "Refactor API endpoints",
        description: "Refactor API endpoints to follow REST principles",
        priority: Priority::Medium,
        due_in_days: 4,
        age_days: 0,
        assignee: 1,
        tags: &[("API", "#008080"), ("Development", "#FFD700")],
    },
];

const DONE: &[TaskSeed] = &[
    TaskSeed {
        title: "Fix navigation bug",
        description: "Fixed the bug in the navigation menu that caused it to collapse on mobile",
        priority: Priority::High,
        due_in_days: -1,
        age_days: 5,
        assignee: 0,
        tags: &[("Bug", "#FF0000"), ("Mobile", "#800080")],
    },
    TaskSeed {
        title: "Create login page design",
        description: "Designed the new login page with dark mode support",
        priority: Priority::Medium,
        due_in_days: -2,
        age_days: 7,
        assignee: 1,
        tags: &[("Design", "#33A1FF"), ("UI/UX", "#D133FF")],
    },
];

/// "Development Board" with To Do / In Progress / Done columns (3/2/2 tasks).
///
/// Tasks are assigned round-robin into `users`; an empty slice leaves them
/// unassigned.
pub fn sample_board(now: DateTime<Utc>, users: &[User]) -> Board {
    let mut board = Board::new(new_id(), "Development Board", now);

    for (title, seeds) in [("To Do", TODO), ("In Progress", IN_PROGRESS), ("Done", DONE)] {
        let mut column = Column::new(new_id(), title, now);
        for seed in seeds {
            let task = seed_task(seed, now, users);
            column.task_ids.push(task.id);
            board.tasks.insert(task.id, task);
        }
        board.columns.push(column);
    }

    board
}

fn seed_task(seed: &TaskSeed, now: DateTime<Utc>, users: &[User]) -> Task {
    let mut task = Task::new(new_id(), seed.title, seed.priority, now);
    task.description = seed.description.to_string();
    task.due_date = Some(now + Duration::days(seed.due_in_days));
    task.created_at = now - Duration::days(seed.age_days);
    task.assignee_id = match users.len() {
        0 => None,
        len => Some(users[seed.assignee % len].id),
    };
    for (name, color) in seed.tags {
        task.attach_tag(&Tag::new(new_id(), *name, *color));
    }
    task
}
