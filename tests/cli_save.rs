mod common;

use common::{run_tasks, stderr, stdout, StubServer};

fn created_then_listed(req: &common::Recorded) -> (u16, String) {
    match req.method.as_str() {
        "POST" => (201, format!(r#"{{"id":"9",{}"#, &req.body[1..])),
        _ => (200, r#"[{"id":"9","title":"Buy milk","dueDay":"2024-02-02"}]"#.to_string()),
    }
}

#[test]
fn add_posts_the_form_then_reloads() {
    let server = StubServer::start(created_then_listed);
    let output = run_tasks(
        &server.url,
        &["add", "Buy milk", "--due", "2024-02-02", "--priority", "high", "--finish", "no"],
        None,
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Task created"));

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!((requests[0].method.as_str(), requests[0].path.as_str()), ("POST", "/Tasks"));
    let body = requests[0].json();
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["dueDay"], "2024-02-02");
    assert_eq!(body["priority"], "High");
    assert_eq!(body["finish"], "No");
    assert_eq!(body["category"], "");
    assert!(body.get("id").is_none());
    assert_eq!((requests[1].method.as_str(), requests[1].path.as_str()), ("GET", "/Tasks"));
}

#[test]
fn add_without_due_day_is_rejected_before_any_request() {
    let server = StubServer::start(created_then_listed);
    let output = run_tasks(&server.url, &["add", "Buy milk"], None);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Title and Due Day are required."));
    assert!(server.requests().is_empty());
}

#[test]
fn add_with_unparseable_due_is_rejected() {
    let server = StubServer::start(created_then_listed);
    let output = run_tasks(&server.url, &["add", "Buy milk", "--due", "someday"], None);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid due date"));
    assert!(server.requests().is_empty());
}

#[test]
fn add_with_out_of_range_due_is_rejected() {
    let server = StubServer::start(created_then_listed);
    let output = run_tasks(&server.url, &["add", "Buy milk", "--due", "in 100000000d"], None);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid due date"));
    assert!(!stderr(&output).contains("panicked"));
    assert!(server.requests().is_empty());
}

#[test]
fn rejected_save_reports_and_skips_refresh() {
    let server = StubServer::start(|_| (500, r#"{"error":"nope"}"#.to_string()));
    let output = run_tasks(&server.url, &["add", "Buy milk", "--due", "2024-02-02"], None);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to save the task."));
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn edit_fetches_then_puts_the_merged_record() {
    let server = StubServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
        ("GET", "/Tasks/4") => (
            200,
            r#"{"id":"4","Title":"Old","DueDay":"2024-03-03","category":"Work"}"#.to_string(),
        ),
        ("PUT", "/Tasks/4") => (200, req.body.clone()),
        _ => (200, "[]".to_string()),
    });
    let output = run_tasks(&server.url, &["edit", "4", "--title", "New", "--priority", "low"], None);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let requests = server.requests();
    let methods: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, ["GET", "PUT", "GET"]);

    let body = requests[1].json();
    assert_eq!(body["title"], "New");
    assert_eq!(body["dueDay"], "2024-03-03");
    assert_eq!(body["category"], "Work");
    assert_eq!(body["priority"], "Low");
}

#[test]
fn edit_of_missing_task_fails() {
    let server = StubServer::start(|_| (404, r#""Not found""#.to_string()));
    let output = run_tasks(&server.url, &["edit", "99", "--title", "X"], None);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load task 99"));
    assert_eq!(server.requests().len(), 1);
}
