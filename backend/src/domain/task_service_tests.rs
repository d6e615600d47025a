//! Behavioural unit coverage for the task service orchestration flow.

use std::collections::HashMap;
use std::sync::Arc;

use board_core::{CreateTaskBody, TaskStatus, UpdateTaskBody};
use chrono::Utc;
use mockall::predicate::eq;
use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockBadgeLedger, MockBadgeNotifier, MockTaskRepository, MockUserDirectory,
    TaskRepositoryError,
};
use crate::domain::{DisplayName, ErrorCode, User};

fn member(name: &str) -> User {
    User::new(
        UserId::random(),
        DisplayName::new(name).expect("valid name"),
    )
}

fn directory_of(users: &[User]) -> MockUserDirectory {
    let table: HashMap<UserId, User> = users.iter().map(|user| (user.id, user.clone())).collect();
    let mut directory = MockUserDirectory::new();
    directory
        .expect_find()
        .returning(move |id| Ok(table.get(&id).cloned()));
    directory
}

fn quiet_ledger() -> MockBadgeLedger {
    let mut ledger = MockBadgeLedger::new();
    ledger
        .expect_record_completion()
        .returning(|_| Ok(Vec::new()));
    ledger.expect_record_uncompletion().returning(|_| Ok(()));
    ledger
}

fn silent_notifier() -> MockBadgeNotifier {
    let mut notifier = MockBadgeNotifier::new();
    notifier.expect_announce().times(0);
    notifier
}

fn stored_task(creator: UserId, assigned_to: Option<UserId>) -> Task {
    Task::create(TaskDraft {
        id: Uuid::new_v4(),
        title: "Rake the leaves".to_owned(),
        details: None,
        status: TaskStatus::Todo,
        recurring: None,
        due_date: None,
        created_at: Utc::now(),
        creator,
        assigned_to,
    })
    .expect("valid draft")
}

fn make_service(
    tasks: MockTaskRepository,
    members: MockUserDirectory,
    badges: MockBadgeLedger,
    notifier: MockBadgeNotifier,
) -> TaskService<MockTaskRepository, MockUserDirectory, MockBadgeLedger> {
    TaskService::new(
        Arc::new(tasks),
        Arc::new(members),
        Arc::new(badges),
        Arc::new(notifier),
    )
}

#[rstest]
#[tokio::test]
async fn create_defaults_to_todo_and_resolves_the_creator() {
    let maja = member("Maja");
    let mut tasks = MockTaskRepository::new();
    tasks.expect_insert().times(1).returning(|_| Ok(()));

    let service = make_service(tasks, directory_of(&[maja.clone()]), quiet_ledger(), silent_notifier());
    let mutation = service
        .create_task(CreateTaskRequest {
            actor: maja.id,
            body: CreateTaskBody::titled("Buy firewood"),
        })
        .await
        .expect("creation should succeed");

    assert_eq!(mutation.task.status, TaskStatus::Todo);
    assert_eq!(mutation.task.user, maja.to_ref());
    assert!(mutation.task.completion_consistent());
    assert!(mutation.earned_badges.is_empty());
}

#[rstest]
#[tokio::test]
async fn create_rejects_an_unknown_actor() {
    let mut tasks = MockTaskRepository::new();
    tasks.expect_insert().times(0);

    let service = make_service(tasks, directory_of(&[]), quiet_ledger(), silent_notifier());
    let error = service
        .create_task(CreateTaskRequest {
            actor: UserId::random(),
            body: CreateTaskBody::titled("Buy firewood"),
        })
        .await
        .expect_err("unknown actor must be rejected");

    assert_eq!(error.code, ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn create_rejects_an_unknown_assignee() {
    let maja = member("Maja");
    let mut tasks = MockTaskRepository::new();
    tasks.expect_insert().times(0);

    let service = make_service(tasks, directory_of(&[maja.clone()]), quiet_ledger(), silent_notifier());
    let error = service
        .create_task(CreateTaskRequest {
            actor: maja.id,
            body: CreateTaskBody {
                assigned_to_id: Some(Uuid::new_v4()),
                ..CreateTaskBody::titled("Buy firewood")
            },
        })
        .await
        .expect_err("unknown assignee must be rejected");

    assert_eq!(error.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_directly_in_done_attributes_the_creator_and_awards() {
    let maja = member("Maja");
    let actor = maja.id;

    let mut tasks = MockTaskRepository::new();
    tasks.expect_insert().times(1).returning(|_| Ok(()));

    let mut badges = MockBadgeLedger::new();
    badges
        .expect_record_completion()
        .with(eq(actor))
        .times(1)
        .returning(|_| Ok(vec!["first-task-done".to_owned()]));

    let mut notifier = MockBadgeNotifier::new();
    notifier
        .expect_announce()
        .withf(move |event| event.user == actor && event.badges == ["first-task-done"])
        .times(1)
        .return_const(());

    let service = make_service(tasks, directory_of(&[maja.clone()]), badges, notifier);
    let mutation = service
        .create_task(CreateTaskRequest {
            actor,
            body: CreateTaskBody {
                status: Some(TaskStatus::Done),
                ..CreateTaskBody::titled("Buy firewood")
            },
        })
        .await
        .expect("creation should succeed");

    assert_eq!(mutation.task.status, TaskStatus::Done);
    assert_eq!(
        mutation.task.completed_by.as_ref(),
        Some(&maja.to_ref())
    );
    assert!(mutation.task.completion_consistent());
    assert_eq!(mutation.earned_badges, ["first-task-done"]);
}

#[rstest]
#[tokio::test]
async fn only_the_creator_may_edit_descriptive_fields() {
    let maja = member("Maja");
    let teo = member("Teo");
    let task = stored_task(maja.id, Some(teo.id));
    let id = task.id();

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks.expect_save().times(0);

    let service = make_service(
        tasks,
        directory_of(&[maja, teo.clone()]),
        quiet_ledger(),
        silent_notifier(),
    );
    let error = service
        .update_task(UpdateTaskRequest {
            actor: teo.id,
            id,
            body: UpdateTaskBody {
                title: Some("Rake everything".to_owned()),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect_err("assignee rename must be rejected");

    assert_eq!(error.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn the_assignee_may_complete_and_gets_the_attribution() {
    let maja = member("Maja");
    let teo = member("Teo");
    let actor = teo.id;
    let task = stored_task(maja.id, Some(actor));
    let id = task.id();

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks
        .expect_save()
        .withf(|saved| saved.status().is_done())
        .times(1)
        .returning(|_| Ok(()));

    let mut badges = MockBadgeLedger::new();
    badges
        .expect_record_completion()
        .with(eq(actor))
        .times(1)
        .returning(|_| Ok(vec!["ten-tasks-done".to_owned()]));

    let mut notifier = MockBadgeNotifier::new();
    notifier
        .expect_announce()
        .withf(move |event| event.user == actor && event.badges == ["ten-tasks-done"])
        .times(1)
        .return_const(());

    let service = make_service(tasks, directory_of(&[maja, teo.clone()]), badges, notifier);
    let mutation = service
        .update_task(UpdateTaskRequest {
            actor,
            id,
            body: UpdateTaskBody {
                completed: Some(true),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect("assignee completion should succeed");

    assert_eq!(
        mutation.task.completed_by.as_ref(),
        Some(&teo.to_ref())
    );
    assert!(mutation.task.completion_consistent());
    assert_eq!(mutation.earned_badges, ["ten-tasks-done"]);
}

#[rstest]
#[tokio::test]
async fn an_explicit_status_wins_over_the_legacy_flag() {
    let maja = member("Maja");
    let task = stored_task(maja.id, None);
    let id = task.id();

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks.expect_save().times(1).returning(|_| Ok(()));

    let mut badges = MockBadgeLedger::new();
    badges.expect_record_completion().times(0);

    let service = make_service(tasks, directory_of(&[maja.clone()]), badges, silent_notifier());
    let mutation = service
        .update_task(UpdateTaskRequest {
            actor: maja.id,
            id,
            body: UpdateTaskBody {
                status: Some(TaskStatus::InProgress),
                completed: Some(true),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect("update should succeed");

    assert_eq!(mutation.task.status, TaskStatus::InProgress);
    assert!(mutation.task.completed_by.is_none());
    assert!(mutation.task.completion_consistent());
}

#[rstest]
#[tokio::test]
async fn leaving_done_credits_the_original_completer() {
    let maja = member("Maja");
    let teo = member("Teo");
    let mut task = stored_task(maja.id, Some(teo.id));
    task.set_status(TaskStatus::Done, teo.id, Utc::now());
    let id = task.id();
    let completer = teo.id;

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks.expect_save().times(1).returning(|_| Ok(()));

    let mut badges = MockBadgeLedger::new();
    badges
        .expect_record_uncompletion()
        .with(eq(completer))
        .times(1)
        .returning(|_| Ok(()));

    let service = make_service(
        tasks,
        directory_of(&[maja.clone(), teo]),
        badges,
        silent_notifier(),
    );
    let mutation = service
        .update_task(UpdateTaskRequest {
            actor: maja.id,
            id,
            body: UpdateTaskBody {
                completed: Some(false),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect("reopening should succeed");

    assert_eq!(mutation.task.status, TaskStatus::Todo);
    assert!(mutation.task.completed_by.is_none());
    assert!(mutation.task.completion_consistent());
}

#[rstest]
#[tokio::test]
async fn no_announcement_when_no_new_badge_is_earned() {
    let maja = member("Maja");
    let task = stored_task(maja.id, None);
    let id = task.id();

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks.expect_save().times(1).returning(|_| Ok(()));

    let service = make_service(
        tasks,
        directory_of(&[maja.clone()]),
        quiet_ledger(),
        silent_notifier(),
    );
    let mutation = service
        .update_task(UpdateTaskRequest {
            actor: maja.id,
            id,
            body: UpdateTaskBody {
                status: Some(TaskStatus::Done),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect("completion should succeed");

    assert!(mutation.earned_badges.is_empty());
}

#[rstest]
#[tokio::test]
async fn an_empty_patch_is_rejected_before_any_lookup() {
    let maja = member("Maja");
    let mut tasks = MockTaskRepository::new();
    tasks.expect_find().times(0);

    let service = make_service(tasks, directory_of(&[maja.clone()]), quiet_ledger(), silent_notifier());
    let error = service
        .update_task(UpdateTaskRequest {
            actor: maja.id,
            id: Uuid::new_v4(),
            body: UpdateTaskBody::default(),
        })
        .await
        .expect_err("empty patch must be rejected");

    assert_eq!(error.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn updating_a_missing_task_is_not_found() {
    let maja = member("Maja");
    let mut tasks = MockTaskRepository::new();
    tasks.expect_find().returning(|_| Ok(None));

    let service = make_service(tasks, directory_of(&[maja.clone()]), quiet_ledger(), silent_notifier());
    let error = service
        .update_task(UpdateTaskRequest {
            actor: maja.id,
            id: Uuid::new_v4(),
            body: UpdateTaskBody {
                completed: Some(true),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect_err("missing task must be reported");

    assert_eq!(error.code, ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn only_the_creator_may_delete() {
    let maja = member("Maja");
    let teo = member("Teo");
    let task = stored_task(maja.id, Some(teo.id));
    let id = task.id();

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks.expect_remove().times(0);

    let service = make_service(
        tasks,
        directory_of(&[maja, teo.clone()]),
        quiet_ledger(),
        silent_notifier(),
    );
    let error = service
        .delete_task(DeleteTaskRequest { actor: teo.id, id })
        .await
        .expect_err("assignee delete must be rejected");

    assert_eq!(error.code, ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn the_creator_deletes_and_gets_an_acknowledgement() {
    let maja = member("Maja");
    let task = stored_task(maja.id, None);
    let id = task.id();

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks
        .expect_remove()
        .with(eq(id))
        .times(1)
        .returning(|_| Ok(true));

    let service = make_service(tasks, directory_of(&[maja.clone()]), quiet_ledger(), silent_notifier());
    let ack = service
        .delete_task(DeleteTaskRequest { actor: maja.id, id })
        .await
        .expect("creator delete should succeed");

    assert_eq!(ack.id, id);
    assert!(ack.deleted);
}

#[rstest]
#[tokio::test]
async fn a_repository_outage_surfaces_as_service_unavailable() {
    let maja = member("Maja");
    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .returning(|_| Err(TaskRepositoryError::unavailable("store offline")));

    let service = make_service(tasks, directory_of(&[maja.clone()]), quiet_ledger(), silent_notifier());
    let error = service
        .update_task(UpdateTaskRequest {
            actor: maja.id,
            id: Uuid::new_v4(),
            body: UpdateTaskBody {
                completed: Some(true),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect_err("outage must surface");

    assert_eq!(error.code, ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn a_failed_save_leaves_the_ledger_and_the_bus_untouched() {
    let maja = member("Maja");
    let task = stored_task(maja.id, None);
    let id = task.id();

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks
        .expect_save()
        .times(1)
        .returning(|_| Err(TaskRepositoryError::unavailable("store offline")));

    let mut badges = MockBadgeLedger::new();
    badges.expect_record_completion().times(0);

    let service = make_service(tasks, directory_of(&[maja.clone()]), badges, silent_notifier());
    let error = service
        .update_task(UpdateTaskRequest {
            actor: maja.id,
            id,
            body: UpdateTaskBody {
                completed: Some(true),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect_err("failed save must surface");

    assert_eq!(error.code, ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn a_failed_save_on_reopening_keeps_the_tally() {
    let maja = member("Maja");
    let mut task = stored_task(maja.id, None);
    task.set_status(TaskStatus::Done, maja.id, Utc::now());
    let id = task.id();

    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_find()
        .with(eq(id))
        .returning(move |_| Ok(Some(task.clone())));
    tasks
        .expect_save()
        .times(1)
        .returning(|_| Err(TaskRepositoryError::unavailable("store offline")));

    let mut badges = MockBadgeLedger::new();
    badges.expect_record_uncompletion().times(0);

    let service = make_service(tasks, directory_of(&[maja.clone()]), badges, silent_notifier());
    let error = service
        .update_task(UpdateTaskRequest {
            actor: maja.id,
            id,
            body: UpdateTaskBody {
                completed: Some(false),
                ..UpdateTaskBody::default()
            },
        })
        .await
        .expect_err("failed save must surface");

    assert_eq!(error.code, ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn a_failed_insert_awards_no_badges() {
    let maja = member("Maja");
    let mut tasks = MockTaskRepository::new();
    tasks
        .expect_insert()
        .times(1)
        .returning(|_| Err(TaskRepositoryError::unavailable("store offline")));

    let mut badges = MockBadgeLedger::new();
    badges.expect_record_completion().times(0);

    let service = make_service(tasks, directory_of(&[maja.clone()]), badges, silent_notifier());
    let error = service
        .create_task(CreateTaskRequest {
            actor: maja.id,
            body: CreateTaskBody {
                status: Some(TaskStatus::Done),
                ..CreateTaskBody::titled("Buy firewood")
            },
        })
        .await
        .expect_err("failed insert must surface");

    assert_eq!(error.code, ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn listing_resolves_member_references() {
    let maja = member("Maja");
    let teo = member("Teo");
    let task = stored_task(maja.id, Some(teo.id));

    let mut tasks = MockTaskRepository::new();
    let listed = vec![task];
    tasks
        .expect_list_newest_first()
        .returning(move || Ok(listed.clone()));

    let service = make_service(
        tasks,
        directory_of(&[maja.clone(), teo.clone()]),
        quiet_ledger(),
        silent_notifier(),
    );
    let payloads = service.list_tasks().await.expect("listing should succeed");

    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].user, maja.to_ref());
    assert_eq!(payloads[0].assigned_to.as_ref(), Some(&teo.to_ref()));
}
