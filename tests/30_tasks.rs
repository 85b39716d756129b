mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::TestApp;

#[tokio::test]
async fn task_status_defaults_to_todo() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let project = app.create_project(&alice, "Launch").await?;

    let res = app
        .post(&alice, &format!("/api/projects/{}/tasks", project), json!({ "title": "Draft outline" }))
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["status"], "ToDo");
    assert_eq!(res.data()["projectId"], project);
    Ok(())
}

#[tokio::test]
async fn unknown_status_is_validation_error() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let project = app.create_project(&alice, "Launch").await?;
    let uri = format!("/api/projects/{}/tasks", project);

    let res = app.post(&alice, &uri, json!({ "title": "x", "status": "Blocked" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.code(), "VALIDATION_ERROR");
    assert!(res.body["field_errors"]["status"].is_string());

    let list = app.get(&alice, &uri).await?;
    assert_eq!(list.data().as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn create_requires_title() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let project = app.create_project(&alice, "Launch").await?;

    let res = app
        .post(&alice, &format!("/api/projects/{}/tasks", project), json!({ "description": "no title" }))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"]["title"].is_string());
    Ok(())
}

#[tokio::test]
async fn legacy_status_spelling_is_accepted() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let project = app.create_project(&alice, "Launch").await?;

    let res = app
        .post(
            &alice,
            &format!("/api/projects/{}/tasks", project),
            json!({ "title": "x", "status": "In Progress" }),
        )
        .await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["status"], "InProgress");
    Ok(())
}

#[tokio::test]
async fn legacy_nested_route_behaves_the_same() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let bob = app.user("bob");
    let project = app.create_project(&alice, "Launch").await?;
    let uri = format!("/api/tasks/projects/{}/tasks", project);

    let res = app.post(&alice, &uri, json!({ "title": "x" })).await?;
    assert_eq!(res.status, StatusCode::CREATED);

    let res = app.get(&alice, &uri).await?;
    assert_eq!(res.data().as_array().map(Vec::len), Some(1));

    let res = app.get(&bob, &uri).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "Unauthorized to view tasks for this project.");
    Ok(())
}

#[tokio::test]
async fn tasks_under_foreign_project_are_forbidden() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let bob = app.user("bob");
    let project = app.create_project(&alice, "Launch").await?;

    let res = app
        .post(&bob, &format!("/api/projects/{}/tasks", project), json!({ "title": "x" }))
        .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "Unauthorized to add task to this project.");
    Ok(())
}

#[tokio::test]
async fn ownership_is_transitive() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let bob = app.user("bob");
    let project = app.create_project(&alice, "Launch").await?;
    let task = app.create_task(&alice, &project, "Draft outline").await?;
    let uri = format!("/api/tasks/{}", task);

    let res = app.put(&bob, &uri, json!({ "status": "Done" })).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get(&bob, &uri).await?.status, StatusCode::FORBIDDEN);
    assert_eq!(app.delete(&bob, &uri).await?.status, StatusCode::FORBIDDEN);

    let res = app.get(&alice, &uri).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["status"], "ToDo");
    Ok(())
}

#[tokio::test]
async fn update_changes_only_supplied_fields() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let project = app.create_project(&alice, "Launch").await?;
    let task = app.create_task(&alice, &project, "Draft outline").await?;
    let uri = format!("/api/tasks/{}", task);

    let res = app
        .put(&alice, &uri, json!({ "title": "", "description": "draft", "status": "Done" }))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["title"], "Draft outline");
    assert_eq!(res.data()["description"], "draft");
    assert_eq!(res.data()["status"], "Done");

    // any state is reachable from any other
    let res = app.put(&alice, &uri, json!({ "status": "ToDo" })).await?;
    assert_eq!(res.data()["status"], "ToDo");
    Ok(())
}

#[tokio::test]
async fn update_with_bad_status_is_rejected() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let project = app.create_project(&alice, "Launch").await?;
    let task = app.create_task(&alice, &project, "Draft outline").await?;
    let uri = format!("/api/tasks/{}", task);

    let res = app.put(&alice, &uri, json!({ "title": "renamed", "status": "Blocked" })).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.get(&alice, &uri).await?.data()["title"], "Draft outline");
    Ok(())
}

#[tokio::test]
async fn delete_removes_task() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let project = app.create_project(&alice, "Launch").await?;
    let task = app.create_task(&alice, &project, "Draft outline").await?;
    let uri = format!("/api/tasks/{}", task);

    let res = app.delete(&alice, &uri).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["message"], "Task deleted successfully.");
    assert_eq!(app.get(&alice, &uri).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> Result<()> {
    let app = TestApp::new();
    let alice = app.user("alice");
    let missing = Uuid::new_v4();

    let task_uri = format!("/api/tasks/{}", missing);
    assert_eq!(app.put(&alice, &task_uri, json!({ "title": "x" })).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&alice, &task_uri).await?.status, StatusCode::NOT_FOUND);

    let project_uri = format!("/api/projects/{}/tasks", missing);
    assert_eq!(app.get(&alice, &project_uri).await?.status, StatusCode::NOT_FOUND);
    let res = app.post(&alice, &project_uri, json!({ "title": "x" })).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Project not found.");
    Ok(())
}
