use chrono::{DateTime, Duration, Utc};

use tend::lifecycle::{
    plan_active, plan_completed, should_retain, Disposition, RetentionConfig,
};
use tend::modifier::Modifier;
use tend::task::Task;
use tend::vault::Vault;

fn ts(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("timestamp")
}

fn retention() -> RetentionConfig {
    RetentionConfig {
        empty_task: Duration::days(7),
        project: Duration::days(30),
    }
}

fn vault() -> Vault {
    Vault::new("/vault", "tasks", "tasks/completed", "archive")
}

fn task() -> Task {
    Task {
        title: "write report".to_string(),
        content: None,
        is_project: false,
        is_high_priority: false,
        done: false,
        completed_at: None,
        due_date: None,
        do_date: "2099-01-01".to_string(),
        created_at: ts("2024-01-10T08:00:00Z"),
        updated_at: ts("2024-01-10T08:00:00Z"),
    }
}

fn completed(completed_at: DateTime<Utc>) -> Task {
    Task {
        done: true,
        completed_at: Some(completed_at),
        ..task()
    }
}

fn relocate(vault: &Vault, from_completed: bool) -> Modifier {
    if from_completed {
        Modifier::Relocate {
            from: vault.completed_dir().to_path_buf(),
            to: vault.active_dir().to_path_buf(),
        }
    } else {
        Modifier::Relocate {
            from: vault.active_dir().to_path_buf(),
            to: vault.completed_dir().to_path_buf(),
        }
    }
}

#[test]
fn incomplete_tasks_are_always_retained() {
    let cfg = retention();
    for now in [
        ts("2024-01-10T08:00:00Z"),
        ts("2030-01-01T00:00:00Z"),
        ts("2099-12-31T23:59:59Z"),
    ] {
        assert!(should_retain(&task(), now, &cfg));
        // done without a stamp is not completed either
        let inconsistent = Task {
            done: true,
            ..task()
        };
        assert!(should_retain(&inconsistent, now, &cfg));
    }
}

#[test]
fn retention_window_boundaries() {
    let cfg = retention();
    let now = ts("2024-02-20T12:00:00Z");

    let fresh = completed(now - Duration::days(6));
    assert!(should_retain(&fresh, now, &cfg));

    // exactly at the threshold still retains
    let edge = completed(now - Duration::days(7));
    assert!(should_retain(&edge, now, &cfg));

    let expired = completed(now - Duration::days(8));
    assert!(!should_retain(&expired, now, &cfg));

    // projects use the longer window
    let project = Task {
        is_project: true,
        ..completed(now - Duration::days(8))
    };
    assert!(should_retain(&project, now, &cfg));
    let old_project = Task {
        is_project: true,
        ..completed(now - Duration::days(31))
    };
    assert!(!should_retain(&old_project, now, &cfg));
}

#[test]
fn expired_task_is_deleted_expired_project_is_archived() {
    let cfg = retention();
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");

    let plan = plan_completed(&completed(now - Duration::days(8)), now, &cfg, &vault);
    assert_eq!(plan.disposition, Disposition::Delete);
    assert!(plan.modifiers.is_empty());

    let project = Task {
        is_project: true,
        ..completed(now - Duration::days(31))
    };
    let plan = plan_completed(&project, now, &cfg, &vault);
    assert_eq!(plan.disposition, Disposition::Archive);
    assert!(plan.modifiers.is_empty());
}

#[test]
fn completed_within_retention_is_retained() {
    let cfg = retention();
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");
    let plan = plan_completed(&completed(now - Duration::days(2)), now, &cfg, &vault);
    assert_eq!(plan.disposition, Disposition::Retain);
}

#[test]
fn done_without_stamp_is_repaired_in_place() {
    let cfg = retention();
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");
    let inconsistent = Task {
        done: true,
        ..task()
    };
    let plan = plan_completed(&inconsistent, now, &cfg, &vault);
    assert_eq!(plan.disposition, Disposition::Update);
    assert_eq!(plan.modifiers, vec![Modifier::Complete(now)]);
}

#[test]
fn stamp_without_done_moves_back_to_active() {
    let cfg = retention();
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");
    let reverted = Task {
        done: false,
        completed_at: Some(ts("2024-02-01T12:00:00Z")),
        ..task()
    };
    let plan = plan_completed(&reverted, now, &cfg, &vault);
    assert_eq!(plan.disposition, Disposition::Update);
    assert_eq!(
        plan.modifiers,
        vec![Modifier::Uncomplete, relocate(&vault, true)]
    );
}

#[test]
fn active_task_with_content_becomes_project() {
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");
    let with_content = Task {
        content: Some("notes".to_string()),
        ..task()
    };
    let plan = plan_active(&with_content, now, &vault);
    assert_eq!(plan.disposition, Disposition::Update);
    assert_eq!(plan.modifiers, vec![Modifier::Project]);
}

#[test]
fn active_project_without_content_is_unprojected() {
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");
    let empty_project = Task {
        is_project: true,
        ..task()
    };
    let plan = plan_active(&empty_project, now, &vault);
    assert_eq!(plan.modifiers, vec![Modifier::Unproject]);
}

#[test]
fn overdue_do_date_is_refreshed() {
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");
    let overdue = Task {
        do_date: "2024-02-19".to_string(),
        ..task()
    };
    let plan = plan_active(&overdue, now, &vault);
    assert_eq!(plan.modifiers, vec![Modifier::DoDateToday]);

    // today and future dates are left alone
    for do_date in ["2024-02-20", "2024-02-21"] {
        let current = Task {
            do_date: do_date.to_string(),
            ..task()
        };
        let plan = plan_active(&current, now, &vault);
        assert_eq!(plan.disposition, Disposition::Retain);
    }
}

#[test]
fn done_active_task_completes_then_relocates() {
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");
    let done = Task {
        done: true,
        ..task()
    };
    let plan = plan_active(&done, now, &vault);
    assert_eq!(plan.disposition, Disposition::Update);
    assert_eq!(
        plan.modifiers,
        vec![Modifier::Complete(now), relocate(&vault, false)]
    );
}

#[test]
fn consistent_active_task_is_retained() {
    let vault = vault();
    let now = ts("2024-02-20T12:00:00Z");
    let plan = plan_active(&task(), now, &vault);
    assert_eq!(plan.disposition, Disposition::Retain);
    assert!(plan.modifiers.is_empty());
}
