use chrono::{DateTime, TimeZone, Utc};
use kanban_core::{
    new_id, Board, BoardId, BoardStore, Column, ColumnId, EntityKind, IntegrityViolation,
    Priority, StoreError, Task, TaskId, TaskMove,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

struct Fixture {
    store: BoardStore,
    board_id: BoardId,
    column_a: ColumnId,
    column_b: ColumnId,
    /// t1, t2, t3 in A; t4 in B.
    tasks: Vec<TaskId>,
}

fn fixture() -> Fixture {
    let mut store = BoardStore::new();
    let board = Board::new(new_id(), "Sprint", now());
    let board_id = board.id;
    store.add_board(board).unwrap();

    let column_a = Column::new(new_id(), "A", now());
    let column_b = Column::new(new_id(), "B", now());
    let (a, b) = (column_a.id, column_b.id);
    store.add_column(board_id, column_a).unwrap();
    store.add_column(board_id, column_b).unwrap();

    let mut tasks = Vec::new();
    for (n, column_id) in [(1, a), (2, a), (3, a), (4, b)] {
        let task = Task::new(new_id(), format!("t{n}"), Priority::Medium, now());
        tasks.push(task.id);
        store.add_task(board_id, column_id, task).unwrap();
    }

    Fixture {
        store,
        board_id,
        column_a: a,
        column_b: b,
        tasks,
    }
}

fn task_ids(store: &BoardStore, board_id: BoardId, column_id: ColumnId) -> Vec<TaskId> {
    store
        .board(board_id)
        .unwrap()
        .column(column_id)
        .unwrap()
        .task_ids
        .clone()
}

#[test]
fn add_task_appends_to_column_in_insertion_order() {
    let f = fixture();
    assert_eq!(
        task_ids(&f.store, f.board_id, f.column_a),
        vec![f.tasks[0], f.tasks[1], f.tasks[2]]
    );
    assert_eq!(task_ids(&f.store, f.board_id, f.column_b), vec![f.tasks[3]]);
    assert!(f.store.board(f.board_id).unwrap().is_consistent());
}

#[test]
fn cross_column_move_splices_both_columns() {
    let mut f = fixture();
    let (t1, t2, t3, t4) = (f.tasks[0], f.tasks[1], f.tasks[2], f.tasks[3]);

    f.store
        .move_task(
            f.board_id,
            TaskMove {
                task_id: t2,
                source_column_id: f.column_a,
                destination_column_id: f.column_b,
                source_index: 1,
                destination_index: 0,
            },
        )
        .unwrap();

    assert_eq!(task_ids(&f.store, f.board_id, f.column_a), vec![t1, t3]);
    assert_eq!(task_ids(&f.store, f.board_id, f.column_b), vec![t2, t4]);
}

#[test]
fn same_column_move_interprets_destination_after_removal() {
    let mut f = fixture();
    let (t1, t2, t3) = (f.tasks[0], f.tasks[1], f.tasks[2]);

    f.store
        .move_task(
            f.board_id,
            TaskMove {
                task_id: t1,
                source_column_id: f.column_a,
                destination_column_id: f.column_a,
                source_index: 0,
                destination_index: 2,
            },
        )
        .unwrap();

    assert_eq!(task_ids(&f.store, f.board_id, f.column_a), vec![t2, t3, t1]);
}

#[test]
fn move_to_same_position_leaves_column_unchanged() {
    let mut f = fixture();
    let before = task_ids(&f.store, f.board_id, f.column_a);

    for (index, task_id) in before.clone().into_iter().enumerate() {
        f.store
            .move_task(
                f.board_id,
                TaskMove {
                    task_id,
                    source_column_id: f.column_a,
                    destination_column_id: f.column_a,
                    source_index: index,
                    destination_index: index,
                },
            )
            .unwrap();
        assert_eq!(task_ids(&f.store, f.board_id, f.column_a), before);
    }
}

#[test]
fn move_into_empty_column_and_back() {
    let mut f = fixture();
    let column_c = Column::new(new_id(), "C", now());
    let c = column_c.id;
    f.store.add_column(f.board_id, column_c).unwrap();
    let t4 = f.tasks[3];

    let to_c = TaskMove {
        task_id: t4,
        source_column_id: f.column_b,
        destination_column_id: c,
        source_index: 0,
        destination_index: 0,
    };
    f.store.move_task(f.board_id, to_c).unwrap();
    assert!(task_ids(&f.store, f.board_id, f.column_b).is_empty());
    assert_eq!(task_ids(&f.store, f.board_id, c), vec![t4]);

    let back = TaskMove {
        source_column_id: c,
        destination_column_id: f.column_b,
        ..to_c
    };
    f.store.move_task(f.board_id, back).unwrap();
    assert_eq!(task_ids(&f.store, f.board_id, f.column_b), vec![t4]);
}

#[test]
fn delete_column_cascades_to_its_tasks() {
    let mut f = fixture();
    f.store.delete_column(f.board_id, f.column_a).unwrap();

    let board = f.store.board(f.board_id).unwrap();
    assert_eq!(board.columns.len(), 1);
    assert_eq!(board.tasks.len(), 1);
    for removed in &f.tasks[..3] {
        assert!(board.task(*removed).is_none());
    }
    assert!(board.task(f.tasks[3]).is_some());
    assert!(board.is_consistent());
}

#[test]
fn delete_task_removes_from_map_and_columns() {
    let mut f = fixture();
    let t2 = f.tasks[1];
    f.store.delete_task(f.board_id, t2).unwrap();

    let board = f.store.board(f.board_id).unwrap();
    assert!(board.task(t2).is_none());
    assert!(board.task_column(t2).is_none());
    assert_eq!(
        task_ids(&f.store, f.board_id, f.column_a),
        vec![f.tasks[0], f.tasks[2]]
    );

    let err = f.store.delete_task(f.board_id, t2).unwrap_err();
    assert_eq!(err, StoreError::not_found(EntityKind::Task, t2));
}

#[test]
fn update_task_replaces_content_but_not_placement() {
    let mut f = fixture();
    let t1 = f.tasks[0];
    let mut edited = f.store.board(f.board_id).unwrap().task(t1).unwrap().clone();
    edited.title = "t1 edited".to_string();
    edited.priority = Priority::High;

    f.store.update_task(f.board_id, edited).unwrap();

    let board = f.store.board(f.board_id).unwrap();
    assert_eq!(board.task(t1).unwrap().title, "t1 edited");
    assert_eq!(board.task_column(t1).unwrap().id, f.column_a);
    assert_eq!(
        task_ids(&f.store, f.board_id, f.column_a),
        vec![f.tasks[0], f.tasks[1], f.tasks[2]]
    );
}

#[test]
fn update_task_with_unknown_id_leaves_task_map_unchanged() {
    let mut f = fixture();
    let before = serde_json::to_vec(&f.store.board(f.board_id).unwrap().tasks).unwrap();

    let stranger = Task::new(new_id(), "stranger", Priority::Low, now());
    let stranger_id = stranger.id;
    let err = f.store.update_task(f.board_id, stranger).unwrap_err();

    assert_eq!(err, StoreError::not_found(EntityKind::Task, stranger_id));
    let after = serde_json::to_vec(&f.store.board(f.board_id).unwrap().tasks).unwrap();
    assert_eq!(before, after);
}

#[test]
fn current_board_follows_updates_without_refresh() {
    let mut f = fixture();
    f.store.set_current_board(Some(f.board_id));

    let mut renamed = f.store.board(f.board_id).unwrap().clone();
    renamed.title = "Renamed".to_string();
    f.store.update_board(renamed).unwrap();
    assert_eq!(f.store.current_board().unwrap().title, "Renamed");

    let new_task = Task::new(new_id(), "late", Priority::Low, now());
    f.store.add_task(f.board_id, f.column_b, new_task).unwrap();
    assert_eq!(f.store.current_board().unwrap().tasks.len(), 5);
}

#[test]
fn deleting_active_board_clears_selection() {
    let mut f = fixture();
    let other = Board::new(new_id(), "Other", now());
    let other_id = other.id;
    f.store.add_board(other).unwrap();

    f.store.set_current_board(Some(other_id));
    f.store.delete_board(f.board_id).unwrap();
    assert_eq!(f.store.current_board_id(), Some(other_id));

    f.store.delete_board(other_id).unwrap();
    assert!(f.store.current_board_id().is_none());
    assert!(f.store.current_board().is_none());
    assert!(f.store.is_empty());
}

#[test]
fn add_board_does_not_select_it() {
    let mut store = BoardStore::new();
    store.add_board(Board::new(new_id(), "first", now())).unwrap();
    assert!(store.current_board().is_none());
}

#[test]
fn selecting_unknown_board_resolves_to_none() {
    let mut f = fixture();
    f.store.set_current_board(Some(new_id()));
    assert!(f.store.current_board().is_none());
}

#[test]
fn operations_on_missing_board_report_not_found_and_change_nothing() {
    let mut f = fixture();
    let missing = new_id();
    let snapshot = f.store.boards().to_vec();

    let column = Column::new(new_id(), "ghost", now());
    let task = Task::new(new_id(), "ghost", Priority::Low, now());
    let request = TaskMove {
        task_id: f.tasks[0],
        source_column_id: f.column_a,
        destination_column_id: f.column_b,
        source_index: 0,
        destination_index: 0,
    };
    let results = [
        f.store.update_board(Board::new(missing, "ghost", now())),
        f.store.add_column(missing, column.clone()),
        f.store.update_column(missing, column),
        f.store.delete_column(missing, f.column_a),
        f.store.add_task(missing, f.column_a, task.clone()),
        f.store.update_task(missing, task),
        f.store.delete_task(missing, f.tasks[0]),
        f.store.move_task(missing, request),
        f.store.delete_board(missing),
    ];
    for result in results {
        assert_eq!(
            result.unwrap_err(),
            StoreError::not_found(EntityKind::Board, missing)
        );
    }
    assert_eq!(f.store.boards(), snapshot.as_slice());
    assert!(f.store.last_error().is_some());
}

#[test]
fn update_column_keeps_position_and_rejects_unknown_column() {
    let mut f = fixture();
    let mut renamed = f
        .store
        .board(f.board_id)
        .unwrap()
        .column(f.column_a)
        .unwrap()
        .clone();
    renamed.title = "Backlog".to_string();
    f.store.update_column(f.board_id, renamed).unwrap();
    assert_eq!(f.store.board(f.board_id).unwrap().columns[0].title, "Backlog");

    let ghost = Column::new(new_id(), "ghost", now());
    let ghost_id = ghost.id;
    assert_eq!(
        f.store.update_column(f.board_id, ghost).unwrap_err(),
        StoreError::not_found(EntityKind::Column, ghost_id)
    );
}

#[test]
fn update_column_cannot_steal_tasks_from_another_column() {
    let mut f = fixture();
    let mut greedy = f
        .store
        .board(f.board_id)
        .unwrap()
        .column(f.column_b)
        .unwrap()
        .clone();
    greedy.task_ids.push(f.tasks[0]);

    let err = f.store.update_column(f.board_id, greedy).unwrap_err();
    assert_eq!(err, StoreError::already_exists(EntityKind::Task, f.tasks[0]));
    assert!(f.store.board(f.board_id).unwrap().is_consistent());
}

#[test]
fn referential_integrity_holds_across_mixed_mutations() {
    let mut f = fixture();
    let board_id = f.board_id;
    let (a, b) = (f.column_a, f.column_b);
    let t = f.tasks.clone();

    let moves = [
        TaskMove {
            task_id: t[2],
            source_column_id: a,
            destination_column_id: b,
            source_index: 2,
            destination_index: 1,
        },
        TaskMove {
            task_id: t[3],
            source_column_id: b,
            destination_column_id: a,
            source_index: 0,
            destination_index: 0,
        },
        // Stale drag: index 9 does not exist.
        TaskMove {
            task_id: t[0],
            source_column_id: a,
            destination_column_id: b,
            source_index: 9,
            destination_index: 0,
        },
    ];
    for request in moves {
        let _ = f.store.move_task(board_id, request);
        assert!(f.store.board(board_id).unwrap().is_consistent());
    }

    let _ = f.store.delete_task(board_id, t[1]);
    let _ = f.store.add_task(
        board_id,
        b,
        Task::new(new_id(), "new", Priority::High, now()),
    );
    let _ = f.store.update_task(board_id, Task::new(new_id(), "ghost", Priority::Low, now()));
    let _ = f.store.delete_column(board_id, a);

    let board = f.store.board(board_id).unwrap();
    assert!(board.integrity_violations().is_empty());
    for column in &board.columns {
        for task_id in &column.task_ids {
            assert!(board.tasks.contains_key(task_id));
        }
    }
}

#[test]
fn set_boards_replaces_collection_and_keeps_selection_by_id() {
    let mut f = fixture();
    f.store.set_current_board(Some(f.board_id));
    let mut replacement = f.store.board(f.board_id).unwrap().clone();
    replacement.title = "Reloaded".to_string();

    f.store.set_boards(vec![replacement]).unwrap();
    assert_eq!(f.store.len(), 1);
    assert_eq!(f.store.current_board().unwrap().title, "Reloaded");
}

/// Board whose single column lists a task id absent from the task map.
fn board_with_dangling_ref(board_id: BoardId) -> (Board, ColumnId, TaskId) {
    let mut board = Board::new(board_id, "Imported", now());
    let mut column = Column::new(new_id(), "To Do", now());
    let dangling = new_id();
    column.task_ids.push(dangling);
    let column_id = column.id;
    board.columns.push(column);
    (board, column_id, dangling)
}

#[test]
fn whole_board_writes_reject_dangling_task_refs() {
    let mut f = fixture();
    let snapshot = f.store.boards().to_vec();

    let (fresh, column_id, task_id) = board_with_dangling_ref(new_id());
    let expected = vec![IntegrityViolation::DanglingTaskRef { column_id, task_id }];
    assert_eq!(
        f.store.add_board(fresh.clone()).unwrap_err(),
        StoreError::InconsistentBoard {
            board_id: fresh.id,
            violations: expected,
        }
    );

    let (replacement, _, _) = board_with_dangling_ref(f.board_id);
    assert!(matches!(
        f.store.update_board(replacement.clone()),
        Err(StoreError::InconsistentBoard { .. })
    ));
    assert!(matches!(
        f.store.set_boards(vec![replacement]),
        Err(StoreError::InconsistentBoard { .. })
    ));

    assert_eq!(f.store.boards(), snapshot.as_slice());
    assert!(f.store.board(fresh.id).is_none());
    assert!(f.store.last_error().is_some());
}

#[test]
fn whole_board_writes_reject_task_in_two_columns() {
    let mut f = fixture();
    let mut replacement = f.store.board(f.board_id).unwrap().clone();
    let shared = f.tasks[0];
    replacement.columns[1].task_ids.push(shared);

    assert_eq!(
        f.store.update_board(replacement).unwrap_err(),
        StoreError::InconsistentBoard {
            board_id: f.board_id,
            violations: vec![IntegrityViolation::DuplicateTaskRef {
                task_id: shared,
                occurrences: 2,
            }],
        }
    );
    assert!(f.store.board(f.board_id).unwrap().is_consistent());
}

#[test]
fn column_writes_reject_repeated_task_id() {
    let mut f = fixture();
    let task = Task::new(new_id(), "loose", Priority::Low, now());
    let task_id = task.id;
    let mut board = f.store.board(f.board_id).unwrap().clone();
    board.tasks.insert(task_id, task);
    f.store.update_board(board).unwrap();

    let mut doubled = Column::new(new_id(), "Doubled", now());
    doubled.task_ids = vec![task_id, task_id];
    assert_eq!(
        f.store.add_column(f.board_id, doubled).unwrap_err(),
        StoreError::already_exists(EntityKind::Task, task_id)
    );

    let mut column_b = f
        .store
        .board(f.board_id)
        .unwrap()
        .column(f.column_b)
        .unwrap()
        .clone();
    column_b.task_ids = vec![f.tasks[3], f.tasks[3]];
    assert_eq!(
        f.store.update_column(f.board_id, column_b).unwrap_err(),
        StoreError::already_exists(EntityKind::Task, f.tasks[3])
    );

    let board = f.store.board(f.board_id).unwrap();
    assert_eq!(board.columns.len(), 2);
    assert_eq!(task_ids(&f.store, f.board_id, f.column_b), vec![f.tasks[3]]);
    assert!(board.is_consistent());
}

#[test]
fn loading_and_error_surface_are_caller_controlled() {
    let mut store = BoardStore::new();
    store.set_loading(true);
    assert!(store.is_loading());
    store.set_error(Some("sync offline".to_string()));
    assert_eq!(store.last_error(), Some("sync offline"));
    store.clear_error();
    assert!(store.last_error().is_none());
}
