use axum::http::StatusCode;
use serde_json::json;

mod support;

use support::{ADMIN_TOKEN, CUSTOMER_TOKEN, TestApp, fixed_now, get, json_request, send};

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();

    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn certificate_pages_use_camel_case() {
    let app = TestApp::new();
    app.certificate("Spa Day", "50", &["spa"]);
    app.certificate("City Tour", "40", &[]);

    let (status, body) = send(
        &app,
        get("/api/v1/certificates?sort=name%20asc&limit=1", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pageNumber"], 1);
    assert_eq!(body["pageSize"], 1);
    assert_eq!(body["totalElements"], 2);
    assert_eq!(body["totalPages"], 2);
    let first = &body["content"][0];
    assert_eq!(first["name"], "City Tour");
    assert_eq!(first["duration"], 30);
    assert!(first["createDate"].is_string());
    assert!(first["lastUpdateDate"].is_string());
    assert_eq!(first["tags"], json!([]));
}

#[tokio::test]
async fn search_parameters_are_decoded() {
    let app = TestApp::new();
    app.certificate("Spa Day", "50", &["spa", "relax"]);
    app.certificate("Sea Trip", "70", &["relax"]);

    let (status, body) = send(
        &app,
        get("/api/v1/certificates?tags=relax%2C%20spa&partOfWord=Spa", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["name"], "Spa Day");
}

#[tokio::test]
async fn blank_filters_match_nothing() {
    let app = TestApp::new();
    app.certificate("Spa Day", "50", &["spa"]);
    app.certificate("City Tour", "40", &[]);

    for query in ["name=", "tags=", "name=%20", "description=", "partOfWord="] {
        let (status, body) = send(&app, get(&format!("/api/v1/certificates?{query}"), None)).await;
        assert_eq!(status, StatusCode::OK, "{query}");
        assert_eq!(body["totalElements"], 0, "{query}");
    }

    let (status, body) = send(&app, get("/api/v1/certificates?sort=&page=", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 2);
}

#[tokio::test]
async fn bad_paging_and_ids_are_client_errors() {
    let app = TestApp::new();
    app.certificate("Spa Day", "50", &[]);

    let (not_a_number, body) = send(&app, get("/api/v1/certificates?page=abc", None)).await;
    assert_eq!(not_a_number, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");

    let (past_end, _) = send(&app, get("/api/v1/certificates?page=5&limit=2", None)).await;
    assert_eq!(past_end, StatusCode::BAD_REQUEST);

    let (zero_id, _) = send(&app, get("/api/v1/certificates/0", None)).await;
    assert_eq!(zero_id, StatusCode::BAD_REQUEST);

    let (missing, body) = send(&app, get("/api/v1/certificates/999", None)).await;
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert!(body.get("fields").is_none());
}

#[tokio::test]
async fn protected_reads_need_a_valid_token() {
    let app = TestApp::new();
    let spa = app.certificate("Spa Day", "50", &[]);
    let uri = format!("/api/v1/certificates/{}/orders", spa.id.0);

    let (anonymous, _) = send(&app, get(&uri, None)).await;
    let (forged, _) = send(&app, get(&uri, Some("forged"))).await;
    let (customer, body) = send(&app, get(&uri, Some(CUSTOMER_TOKEN))).await;

    assert_eq!(anonymous, StatusCode::UNAUTHORIZED);
    assert_eq!(forged, StatusCode::UNAUTHORIZED);
    assert_eq!(customer, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn only_admins_create_certificates() {
    let app = TestApp::new();
    let payload = json!({
        "name": "Spa Day",
        "description": "A relaxing day out",
        "price": "49.90",
        "duration": 30,
        "tags": [{ "name": "spa" }, { "name": "relax" }]
    });

    let (forbidden, _) = send(
        &app,
        json_request("POST", "/api/v1/certificates", Some(CUSTOMER_TOKEN), payload.clone()),
    )
    .await;
    let (created, body) = send(
        &app,
        json_request("POST", "/api/v1/certificates", Some(ADMIN_TOKEN), payload),
    )
    .await;

    assert_eq!(forbidden, StatusCode::FORBIDDEN);
    assert_eq!(created, StatusCode::CREATED);
    assert_eq!(body["name"], "Spa Day");
    assert_eq!(body["price"], "49.90");
    let tags: Vec<&str> = body["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tag| tag["name"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["relax", "spa"]);
}

#[tokio::test]
async fn invalid_certificate_lists_every_field() {
    let app = TestApp::new();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/certificates",
            Some(ADMIN_TOKEN),
            json!({ "description": "A relaxing day out", "duration": 0 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"],
        json!([
            { "field": "name", "value": "null" },
            { "field": "price", "value": "null" },
            { "field": "duration", "value": "0" }
        ])
    );
}

#[tokio::test]
async fn certificate_update_and_delete_over_http() {
    let app = TestApp::new();
    let spa = app.certificate("Spa Day", "50", &["spa"]);
    let uri = format!("/api/v1/certificates/{}", spa.id.0);

    let (updated, body) = send(
        &app,
        json_request("PATCH", &uri, Some(ADMIN_TOKEN), json!({ "duration": 60 })),
    )
    .await;
    assert_eq!(updated, StatusCode::OK);
    assert_eq!(body["duration"], 60);
    assert_eq!(body["tags"][0]["name"], "spa");

    let (deleted, body) = send(
        &app,
        json_request("DELETE", &uri, Some(ADMIN_TOKEN), json!({})),
    )
    .await;
    assert_eq!(deleted, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert!(app.store.tag_names().is_empty());
}

#[tokio::test]
async fn deleting_an_ordered_certificate_conflicts() {
    let app = TestApp::new();
    let spa = app.certificate("Spa Day", "50", &[]);
    app.store.seed_order(&app.customer_user, &[&spa], fixed_now());

    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/v1/certificates/{}", spa.id.0),
            Some(ADMIN_TOKEN),
            json!({}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn tag_endpoints() {
    let app = TestApp::new();

    let (created, body) = send(
        &app,
        json_request("POST", "/api/v1/tags", Some(ADMIN_TOKEN), json!({ "name": "spa" })),
    )
    .await;
    assert_eq!(created, StatusCode::OK);
    assert_eq!(body["name"], "spa");

    let (most_used, body) = send(&app, get("/api/v1/tags/most-used", None)).await;
    assert_eq!(most_used, StatusCode::OK);
    assert_eq!(body["content"], json!([]));

    let id = app.store.seed_tag("relax").id.0;
    let (fetched, body) = send(&app, get(&format!("/api/v1/tags/{id}"), None)).await;
    assert_eq!(fetched, StatusCode::OK);
    assert_eq!(body["name"], "relax");
}

#[tokio::test]
async fn register_then_login() {
    let app = TestApp::new();

    let (registered, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/register",
            None,
            json!({
                "firstName": "Bob",
                "lastName": "Stone",
                "email": "bob.stone@mail.com",
                "password": "hunter2"
            }),
        ),
    )
    .await;
    assert_eq!(registered, StatusCode::CREATED);
    assert_eq!(body["role"], "USER");
    assert_eq!(body["firstName"], "Bob");
    assert!(body.get("password").is_none());
    let id = body["id"].as_i64().unwrap();

    let (logged_in, body) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": "bob.stone@mail.com", "password": "hunter2" }),
        ),
    )
    .await;
    assert_eq!(logged_in, StatusCode::OK);
    assert_eq!(body["token"]["token"], format!("token-for-{id}"));

    let (rejected, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": "bob.stone@mail.com", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(rejected, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn orders_need_a_buyer() {
    let app = TestApp::new();
    let spa = app.certificate("Spa Day", "50", &[]);
    let payload = json!({ "certificateIds": [spa.id.0, spa.id.0] });

    let (anonymous, _) = send(
        &app,
        json_request("POST", "/api/v1/orders", None, payload.clone()),
    )
    .await;
    let (placed, body) = send(
        &app,
        json_request("POST", "/api/v1/orders", Some(CUSTOMER_TOKEN), payload),
    )
    .await;

    assert_eq!(anonymous, StatusCode::FORBIDDEN);
    assert_eq!(placed, StatusCode::CREATED);
    assert_eq!(body["cost"], "100");
    assert_eq!(body["userId"], app.customer_user.id.0);
    assert_eq!(body["certificateIds"], json!([spa.id.0, spa.id.0]));
}

#[tokio::test]
async fn order_search_accepts_repeated_cost_keys() {
    let app = TestApp::new();
    let cheap = app.certificate("Coffee Tasting", "20", &[]);
    let pricey = app.certificate("Sea Trip", "90", &[]);
    app.store.seed_order(&app.customer_user, &[&cheap], fixed_now());
    app.store.seed_order(&app.customer_user, &[&pricey], fixed_now());

    let (status, body) = send(
        &app,
        get("/api/v1/orders?cost=50&cost=100", Some(ADMIN_TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["cost"], "90");
}

#[tokio::test]
async fn promoting_a_user_over_http() {
    let app = TestApp::new();
    let uri = format!("/api/v1/users/{}/admin", app.customer_user.id.0);

    let (denied, _) = send(&app, json_request("POST", &uri, Some(CUSTOMER_TOKEN), json!({}))).await;
    let (promoted, body) = send(&app, json_request("POST", &uri, Some(ADMIN_TOKEN), json!({}))).await;

    assert_eq!(denied, StatusCode::FORBIDDEN);
    assert_eq!(promoted, StatusCode::OK);
    assert_eq!(body["role"], "ADMIN");
}

#[tokio::test]
async fn api_docs_are_served() {
    let app = TestApp::new();

    let (status, body) = send(&app, get("/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/certificates"].is_object());
}
