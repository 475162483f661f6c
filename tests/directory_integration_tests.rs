use roster::api::{ApiError, HttpStudentApi, StudentApi};
use roster::core::directory::{Directory, FetchStatus};
use roster::core::filters::{Mode, SearchFilters, SortDirection};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

/// A student record in the server's wire shape.
fn student_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Student {}", id),
        "email": format!("student{}@example.edu", id),
        "phoneNumber": format!("555-{:04}", id),
        "department": "CS",
        "enrollmentNumber": format!("EN-{:04}", id),
        "dob": "2000-01-01",
        "address": format!("{} University Way", id),
        "joiningDate": "2023-09-01"
    })
}

fn students_json(ids: &[i64]) -> Vec<Value> {
    ids.iter().copied().map(student_json).collect()
}

/// The offset endpoint's envelope.
fn envelope_json(ids: &[i64], total_elements: u64, total_pages: u64, number: u64, last: bool) -> Value {
    json!({
        "content": students_json(ids),
        "totalElements": total_elements,
        "totalPages": total_pages,
        "number": number,
        "last": last
    })
}

fn api_for(server: &MockServer) -> HttpStudentApi {
    HttpStudentApi::new(Some(server.uri()))
}

// ============================================================================
// Offset pagination
// ============================================================================

#[tokio::test]
async fn test_offset_walks_pages_until_server_reports_last() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "0"))
        .and(query_param("size", "4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(&[1, 2, 3, 4], 6, 2, 0, false)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(&[5, 6], 6, 2, 1, true)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let mut directory = Directory::new(Mode::Offset);

    assert!(directory.fetch_next(&api).await);
    assert_eq!(directory.students().len(), 4);
    assert!(directory.has_more());
    assert_eq!(directory.summary().total, Some(6));

    assert!(directory.fetch_next(&api).await);
    assert_eq!(directory.students().len(), 6);
    assert!(!directory.has_more());

    // End of data: no request leaves the client at all. The expect(1)
    // counters above fail the test if a third request ever fires.
    assert!(!directory.fetch_next(&api).await);
}

#[tokio::test]
async fn test_offset_sends_sort_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("sort", "name,desc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(&[9], 1, 1, 0, true)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let mut directory = Directory::new(Mode::Offset);
    directory.set_sort("name", SortDirection::Desc);

    assert!(directory.fetch_next(&api).await);
    assert_eq!(directory.students().len(), 1);
    assert_eq!(directory.students()[0].name, "Student 9");
}

// ============================================================================
// Cursor pagination
// ============================================================================

#[tokio::test]
async fn test_cursor_advances_token_and_infers_end() {
    let mock_server = MockServer::start().await;

    // First page: no cursor parameter at all.
    Mock::given(method("GET"))
        .and(path("/api/students/cursor"))
        .and(query_param_is_missing("cursor"))
        .and(query_param("size", "4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(students_json(&[101, 102, 103, 104])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Second page resumes after the last seen id.
    Mock::given(method("GET"))
        .and(path("/api/students/cursor"))
        .and(query_param("cursor", "104"))
        .respond_with(ResponseTemplate::new(200).set_body_json(students_json(&[105, 106])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let mut directory = Directory::new(Mode::Cursor);

    assert!(directory.fetch_next(&api).await);
    assert_eq!(directory.students().len(), 4);
    assert!(directory.has_more());

    assert!(directory.fetch_next(&api).await);
    assert_eq!(directory.students().len(), 6);
    // Short page (2 < 4): inferred end of data.
    assert!(!directory.has_more());
    assert!(!directory.fetch_next(&api).await);

    // Cursor mode never exposes a total.
    assert_eq!(directory.summary().total, None);
}

#[tokio::test]
async fn test_cursor_empty_first_page_ends_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let mut directory = Directory::new(Mode::Cursor);

    assert!(directory.fetch_next(&api).await);
    assert!(directory.students().is_empty());
    assert!(!directory.has_more());
    assert_eq!(directory.status(), &FetchStatus::Idle);
}

// ============================================================================
// Filters
// ============================================================================

#[tokio::test]
async fn test_filter_change_resets_and_requeries_with_criteria() {
    let mock_server = MockServer::start().await;

    // Unfiltered session: two pages of four + two.
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param_is_missing("department"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(&[1, 2, 3, 4], 6, 2, 0, false)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param_is_missing("department"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(&[5, 6], 6, 2, 1, true)),
        )
        .mount(&mock_server)
        .await;

    // Filtered session restarts from page 0 with the criterion attached and
    // none of the blank fields present.
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("department", "CS"))
        .and(query_param("page", "0"))
        .and(query_param_is_missing("name"))
        .and(query_param_is_missing("email"))
        .and(query_param_is_missing("phoneNumber"))
        .and(query_param_is_missing("enrollmentNumber"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(&[7, 8], 2, 1, 0, true)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let mut directory = Directory::new(Mode::Offset);
    directory.fetch_next(&api).await;
    directory.fetch_next(&api).await;
    assert_eq!(directory.students().len(), 6);

    directory.set_filters(SearchFilters {
        department: "CS".to_string(),
        ..Default::default()
    });
    assert!(directory.students().is_empty());

    assert!(directory.fetch_next(&api).await);
    assert_eq!(directory.students().len(), 2);
    assert_eq!(directory.students()[0].id, 7);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_http_error_surfaces_status_and_keeps_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(&[1, 2, 3], 7, 2, 0, false)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    // The next page blows up server-side once, then recovers.
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope_json(&[4, 5, 6, 7], 7, 2, 1, true)),
        )
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let mut directory = Directory::new(Mode::Offset);

    directory.fetch_next(&api).await;
    assert_eq!(directory.students().len(), 3);

    directory.fetch_next(&api).await;
    match directory.status() {
        FetchStatus::Error(message) => assert!(message.contains("500"), "got: {message}"),
        other => panic!("expected error status, got {:?}", other),
    }
    // Partial progress survives the failure.
    assert_eq!(directory.students().len(), 3);

    // Retrying the same page succeeds and appends.
    directory.fetch_next(&api).await;
    assert_eq!(directory.status(), &FetchStatus::Idle);
    assert_eq!(directory.students().len(), 7);
    assert!(!directory.has_more());
}

#[tokio::test]
async fn test_not_found_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such route"))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let result = api
        .offset_page(&[("page".to_string(), "0".to_string())])
        .await;

    assert!(matches!(result, Err(ApiError::Api { status: 404, .. })));
}

#[tokio::test]
async fn test_malformed_body_maps_to_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let api = api_for(&mock_server);
    let result = api.cursor_page(&[]).await;

    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_connection_refused_maps_to_network_error() {
    // Nothing listens on this port; reqwest fails before any HTTP happens.
    let api = HttpStudentApi::new(Some("http://127.0.0.1:9".to_string()));
    let mut directory = Directory::new(Mode::Cursor);

    assert!(directory.fetch_next(&api).await);
    match directory.status() {
        FetchStatus::Error(message) => assert!(message.contains("network error")),
        other => panic!("expected error status, got {:?}", other),
    }
}
