use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use person_enrich::{
    create_router, Enricher, HttpLookupClient, InMemoryPersonStore, LookupEndpoints, PersonService,
};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    _server: MockServer,
    router: Router,
}

/// 三個查詢都指向同一個 mock server，用不同 path 區分
fn spawn_app(nationality_body: Value) -> TestApp {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/age/");
        then.status(200).json_body(json!({"age": 34}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/gender/");
        then.status(200).json_body(json!({"gender": "male"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/nation/");
        then.status(200).json_body(nationality_body);
    });

    let lookup = HttpLookupClient::new(LookupEndpoints {
        age_base_url: server.url("/age"),
        gender_base_url: server.url("/gender"),
        nation_base_url: server.url("/nation"),
    });
    let service = PersonService::new(Enricher::new(lookup), InMemoryPersonStore::new());

    TestApp {
        _server: server,
        router: create_router(service),
    }
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn us_only() -> Value {
    json!({"country": [{"country_id": "US", "probability": 0.1}]})
}

#[tokio::test]
async fn test_create_then_fetch_person() {
    let app = spawn_app(us_only());

    let (status, created) = send(
        &app.router,
        Method::POST,
        "/personApi/v1/persons",
        Some(json!({"name": "John", "surname": "Smith"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["age"], 34);
    assert_eq!(created["gender"], "male");
    assert_eq!(created["nationality"], "US");
    assert_eq!(created["is_active"], true);

    let (status, fetched) = send(&app.router, Method::GET, "/personApi/v1/persons/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_fails_with_bad_gateway_when_enrichment_fails() {
    let app = spawn_app(json!({"country": []}));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/personApi/v1/persons",
        Some(json!({"name": "X", "surname": "Y"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("enrichment failed"));

    let (_, listed) = send(&app.router, Method::GET, "/personApi/v1/persons", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_create_rejects_missing_surname_and_bad_json() {
    let app = spawn_app(us_only());

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/personApi/v1/persons",
        Some(json!({"name": "John"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "surname is required");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/personApi/v1/persons")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let app = spawn_app(us_only());
    for (name, surname) in [("John", "Smith"), ("Johanna", "Berg"), ("Mike", "Smithson")] {
        let (status, _) = send(
            &app.router,
            Method::POST,
            "/personApi/v1/persons",
            Some(json!({"name": name, "surname": surname})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, listed) = send(
        &app.router,
        Method::GET,
        "/personApi/v1/persons?surname=smith&nation=us",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["John", "Mike"]);

    let (_, page) = send(
        &app.router,
        Method::GET,
        "/personApi/v1/persons?limit=1&offset=1",
        None,
    )
    .await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["name"], "Johanna");

    let (status, _) = send(
        &app.router,
        Method::GET,
        "/personApi/v1/persons?min_age=40&max_age=30",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_soft_delete_person() {
    let app = spawn_app(us_only());
    send(
        &app.router,
        Method::POST,
        "/personApi/v1/persons",
        Some(json!({"name": "John", "surname": "Smith"})),
    )
    .await;

    let (status, updated) = send(
        &app.router,
        Method::PUT,
        "/personApi/v1/persons/1",
        Some(json!({"age": 35, "patronymic": "Robertovich"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["age"], 35);
    assert_eq!(updated["patronymic"], "Robertovich");
    assert_eq!(updated["gender"], "male");

    let (status, body) = send(&app.router, Method::DELETE, "/personApi/v1/persons/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "person deleted successfully");

    let (_, listed) = send(&app.router, Method::GET, "/personApi/v1/persons", None).await;
    assert_eq!(listed, json!([]));

    let (status, fetched) = send(&app.router, Method::GET, "/personApi/v1/persons/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["is_active"], false);
}

#[tokio::test]
async fn test_unknown_and_invalid_ids() {
    let app = spawn_app(us_only());

    let (status, body) = send(&app.router, Method::GET, "/personApi/v1/persons/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "person not found");

    let (status, body) = send(&app.router, Method::GET, "/personApi/v1/persons/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid ID");

    let (status, _) = send(&app.router, Method::DELETE, "/personApi/v1/persons/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app(us_only());

    let (status, body) = send(&app.router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
