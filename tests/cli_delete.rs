mod common;

use common::{run_tasks, stderr, stdout, StubServer};

fn one_record(req: &common::Recorded) -> (u16, String) {
    match req.method.as_str() {
        "DELETE" => (200, r#"{"id":"1"}"#.to_string()),
        _ => (200, "[]".to_string()),
    }
}

#[test]
fn delete_with_yes_skips_the_prompt() {
    let server = StubServer::start(one_record);
    let output = run_tasks(&server.url, &["delete", "1", "--yes"], None);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Deleted task #1"));

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!((requests[0].method.as_str(), requests[0].path.as_str()), ("DELETE", "/Tasks/1"));
    assert_eq!((requests[1].method.as_str(), requests[1].path.as_str()), ("GET", "/Tasks"));
}

#[test]
fn delete_confirmed_on_stdin() {
    let server = StubServer::start(one_record);
    let output = run_tasks(&server.url, &["delete", "1"], Some("y\n"));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Delete task #1?"));
    assert_eq!(server.requests()[0].method, "DELETE");
}

#[test]
fn delete_declined_sends_nothing() {
    let server = StubServer::start(one_record);
    let output = run_tasks(&server.url, &["delete", "1"], Some("n\n"));

    assert!(output.status.success());
    assert!(stdout(&output).contains("Cancelled."));
    assert!(server.requests().is_empty());
}

#[test]
fn failed_delete_reports_and_exits_nonzero() {
    let server = StubServer::start(|_| (404, r#""Not found""#.to_string()));
    let output = run_tasks(&server.url, &["delete", "1", "--yes"], None);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to delete the task."));
    assert_eq!(server.requests().len(), 1);
}
