use super::*;
use chrono::{Duration, Utc};
use uuid::Uuid;

#[test]
fn test_new_task_defaults_to_todo() {
    let user = Uuid::new_v4();
    let task = Task::new(user, None, "Write report", "", None).unwrap();
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.user_id, user);
    assert!(task.completed_at.is_none());
    assert_eq!(task.created_at, task.updated_at);
}

#[test]
fn test_new_task_rejects_blank_title() {
    let err = Task::new(Uuid::new_v4(), None, "   ", "desc", None).unwrap_err();
    assert_eq!(err, ModelError::EmptyTaskTitle);
}

#[test]
fn test_change_status_tracks_completed_at() {
    let mut task = Task::new(Uuid::new_v4(), None, "Read", "", None).unwrap();
    task.change_status(TaskStatus::Completed);
    assert!(task.is_completed());
    assert!(task.completed_at.is_some());

    task.change_status(TaskStatus::Todo);
    assert_eq!(task.status, TaskStatus::Todo);
    assert!(task.completed_at.is_none(), "reopen must clear completed_at");
}

#[test]
fn test_task_apply_partial_update() {
    let ctx = Uuid::new_v4();
    let due = Utc::now() + Duration::days(3);
    let mut task = Task::new(Uuid::new_v4(), Some(ctx), "Old", "keep me", Some(due)).unwrap();
    let before = task.updated_at;

    task.apply(TaskUpdate {
        title: Some("New".into()),
        due_at: Some(None),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(task.title, "New");
    assert_eq!(task.description, "keep me");
    assert_eq!(task.context_id, Some(ctx));
    assert!(task.due_at.is_none());
    assert!(task.updated_at >= before);
}

#[test]
fn test_task_apply_blank_title_is_rejected_atomically() {
    let mut task = Task::new(Uuid::new_v4(), None, "Keep", "d", None).unwrap();
    let err = task
        .apply(TaskUpdate {
            title: Some(" ".into()),
            description: Some("changed".into()),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err, ModelError::EmptyTaskTitle);
    assert_eq!(task.title, "Keep");
    assert_eq!(task.description, "d");
}

#[test]
fn test_task_status_round_trips_through_str() {
    for status in [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ] {
        assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
    }
    assert!("done".parse::<TaskStatus>().is_err());
}

#[test]
fn test_new_context_validates_title() {
    let err = Context::new(
        Uuid::new_v4(),
        ContextType::Other,
        "",
        "",
        "#3B82F6",
        None,
        None,
    )
    .unwrap_err();
    assert_eq!(err, ModelError::EmptyContextTitle);
}

#[test]
fn test_context_type_parse() {
    assert_eq!("work".parse::<ContextType>().unwrap(), ContextType::Work);
    assert_eq!(ContextType::default(), ContextType::Other);
    assert_eq!(
        "hobby".parse::<ContextType>().unwrap_err(),
        ModelError::InvalidContextType("hobby".into())
    );
}

#[test]
fn test_context_apply_update() {
    let mut ctx = Context::new(
        Uuid::new_v4(),
        ContextType::Subject,
        "Math",
        "",
        "#3B82F6",
        None,
        None,
    )
    .unwrap();
    ctx.apply(ContextUpdate {
        description: Some("Calculus II".into()),
        color: Some("#FF0000".into()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(ctx.title, "Math");
    assert_eq!(ctx.description, "Calculus II");
    assert_eq!(ctx.color, "#FF0000");
}

#[test]
fn test_new_user_requires_external_id() {
    assert_eq!(User::new("").unwrap_err(), ModelError::EmptyExternalId);
    let user = User::new("12345").unwrap();
    assert_eq!(user.external_id, "12345");
}
