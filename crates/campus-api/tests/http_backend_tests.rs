use campus_api::{ApiConfig, Backend, HttpBackend, SubjectType};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(ApiConfig::default().with_base_url(format!("{}/api/", server.uri()))).unwrap()
}

fn regulation(id: i64) -> serde_json::Value {
    json!({ "id": id, "name": format!("R{}", id), "program_id": 7 })
}

#[tokio::test]
async fn test_follows_next_links_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/regulations/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 5,
            "next": format!("{}/api/regulations/?page=2", server.uri()),
            "results": [regulation(1), regulation(2)],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/regulations/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 5,
            // Relative links resolve against the current page
            "next": "/api/regulations/?page=3",
            "results": [regulation(3), regulation(4)],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/regulations/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 5,
            "next": null,
            "results": [regulation(5)],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ids: Vec<i64> = backend(&server)
        .list_regulations()
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_bare_array_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/academic-years/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2024, "name": "2024-25", "is_current": true },
            { "id": 2023, "name": "2023-24" },
        ])))
        .mount(&server)
        .await;

    let years = backend(&server).list_academic_years().await.unwrap();

    assert_eq!(years.len(), 2);
    assert!(years[0].is_current);
    assert!(!years[1].is_current);
}

#[tokio::test]
async fn test_batches_send_program_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/batches/"))
        .and(query_param("program_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 12,
            "name": "2024-2028",
            "program_id": 7,
            "regulation_id": 3,
            "admission_year_id": 2024,
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let batches = backend(&server).list_batches(Some(7)).await.unwrap();

    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].regulation_id, 3);
}

#[tokio::test]
async fn test_semester_scoped_endpoints_send_their_parent_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/batch-semesters/"))
        .and(query_param("batch_id", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 101, "batch_id": 12, "semester_number": 1 },
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .and(query_param("batch_semester_id", "101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 5, "name": "A", "batch_semester_id": 101, "student_count": 60 },
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/practical-batches/"))
        .and(query_param("batch_semester_id", "101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "results": [{ "id": 9, "name": "A1", "batch_semester_id": 101 }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let semesters = backend.list_semesters(12).await.unwrap();
    let sections = backend.list_sections(101).await.unwrap();
    let labs = backend.list_practical_batches(101).await.unwrap();

    assert_eq!(semesters[0].semester_number, 1);
    assert_eq!(sections[0].student_count, Some(60));
    assert_eq!(labs[0].name, "A1");
}

#[tokio::test]
async fn test_subjects_send_type_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/subjects/"))
        .and(query_param("batch_semester_id", "101"))
        .and(query_param("subject_type", "theory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Data Structures",
            "batch_semester_id": 101,
            "subject_type": "theory",
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/subjects/"))
        .and(query_param("batch_semester_id", "101"))
        .and(query_param_is_missing("subject_type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let theory = backend
        .list_subjects(101, Some(SubjectType::Theory))
        .await
        .unwrap();
    let all = backend.list_subjects(101, None).await.unwrap();

    assert_eq!(theory.len(), 1);
    assert_eq!(theory[0].subject_type, SubjectType::Theory);
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_error_status_carries_truncated_body() {
    let server = MockServer::start().await;
    let body = format!("upstream exploded {}", "x".repeat(500));
    Mock::given(method("GET"))
        .and(path("/api/programs/"))
        .respond_with(ResponseTemplate::new(503).set_body_string(body))
        .mount(&server)
        .await;

    let message = backend(&server)
        .list_programs()
        .await
        .unwrap_err()
        .to_string();

    assert!(message.contains("503"), "{}", message);
    assert!(message.contains("upstream exploded"), "{}", message);
    assert!(!message.contains(&"x".repeat(200)), "{}", message);
}

#[tokio::test]
async fn test_error_on_later_page_fails_the_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/regulations/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "next": format!("{}/api/regulations/?page=2", server.uri()),
            "results": [regulation(1)],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/regulations/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = backend(&server).list_regulations().await.unwrap_err();

    assert!(err.to_string().contains("500"), "{}", err);
}

#[tokio::test]
async fn test_malformed_json_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/programs/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = backend(&server).list_programs().await.unwrap_err();

    assert!(
        format!("{:#}", err).contains("Failed to parse response"),
        "{:#}",
        err
    );
}
