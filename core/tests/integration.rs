//! Full lifecycle test against the live todo server.
//!
//! # Design
//! Starts the server on a random port, then exercises every core client
//! operation over real HTTP using ureq. Validates that the core's request
//! building and response parsing agree with the actual server.

use todo_core::{
    ApiError, CreateTodo, HttpMethod, HttpResponse, Priority, SortBy, TodoClient, UpdateTodo,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: todo_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse::new(status, body)
}

/// Start a fresh server on a random port and return a client bound to it.
fn start_server() -> TodoClient {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener).await
        })
        .unwrap();
    });

    TodoClient::new(&format!("http://{addr}"))
}

#[test]
fn crud_lifecycle() {
    // Step 1: start the server.
    let client = start_server();

    // Step 2: list: should be empty.
    let req = client.build_list_todos(None);
    let todos = client.parse_list_todos(execute(req)).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 3: create a todo.
    let create_input = CreateTodo {
        title: "Buy milk".to_string(),
        priority: Some(Priority::High),
        ..CreateTodo::default()
    };
    let req = client.build_create_todo(&create_input).unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, "");
    assert_eq!(created.priority, Priority::High);
    assert!(!created.completed);
    assert_eq!(created.created_at, created.updated_at);
    let id = created.id;

    // Step 4: get the created todo.
    let req = client.build_get_todo(id);
    let fetched = client.parse_get_todo(execute(req)).unwrap();
    assert_eq!(fetched, created);

    // Step 5: update completed only.
    let update_input = UpdateTodo {
        completed: Some(true),
        ..UpdateTodo::default()
    };
    let req = client.build_update_todo(id, &update_input).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.title, "Buy milk");
    assert!(updated.completed);
    assert!(updated.updated_at > created.updated_at);

    // Step 6: toggle back.
    let req = client.build_toggle_todo(id);
    let toggled = client.parse_toggle_todo(execute(req)).unwrap();
    assert!(!toggled.completed);
    assert!(toggled.updated_at > updated.updated_at);

    // Step 7: list: should have one item.
    let req = client.build_list_todos(Some(SortBy::CreatedAt));
    let todos = client.parse_list_todos(execute(req)).unwrap();
    assert_eq!(todos.len(), 1);

    // Step 8: delete.
    let req = client.build_delete_todo(id);
    client.parse_delete_todo(execute(req)).unwrap();

    // Step 9: get after delete: should be NotFound.
    let req = client.build_get_todo(id);
    let err = client.parse_get_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: toggle and delete again: should be NotFound.
    let req = client.build_toggle_todo(id);
    let err = client.parse_toggle_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    let req = client.build_delete_todo(id);
    let err = client.parse_delete_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 11: list: should be empty again.
    let req = client.build_list_todos(None);
    let todos = client.parse_list_todos(execute(req)).unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}

#[test]
fn empty_title_is_a_validation_error() {
    let client = start_server();

    let input = CreateTodo::from_form("", "", Priority::Medium, None);
    let req = client.build_create_todo(&input).unwrap();
    let err = client.parse_create_todo(execute(req)).unwrap_err();
    match err {
        ApiError::Validation(message) => assert!(message.contains("title"), "{message}"),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn list_orders_by_requested_key() {
    let client = start_server();

    for (title, priority) in [("b", Priority::High), ("a", Priority::Low), ("c", Priority::Medium)] {
        let input = CreateTodo::from_form(title, "", priority, None);
        let req = client.build_create_todo(&input).unwrap();
        client.parse_create_todo(execute(req)).unwrap();
    }

    let req = client.build_list_todos(Some(SortBy::Priority));
    let ids: Vec<_> = client
        .parse_list_todos(execute(req))
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![1, 3, 2]);

    let req = client.build_list_todos(Some(SortBy::Alphabetical));
    let titles: Vec<_> = client
        .parse_list_todos(execute(req))
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
}
