//! End-to-end tests for the users routes mounted through `add_routers`.

use actix_http::Request;
use actix_web::{
    App,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test::{self, TestRequest},
    web,
};
use backend::Trace;
use backend::api::{HttpState, add_routers};
use backend::models::error::TRACE_ID_HEADER;
use backend::settings::AppSettings;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const PREFIX: &str = "/api/v1/users";

#[fixture]
fn settings() -> AppSettings {
    AppSettings::default()
}

async fn init_app(
    settings: AppSettings,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::in_memory()))
            .wrap(Trace)
            .configure(|cfg| add_routers(cfg, &settings)),
    )
    .await
}

async fn send<S>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, json)
}

fn create_request(name: &str, email: &str) -> Request {
    TestRequest::post()
        .uri(PREFIX)
        .set_json(json!({ "name": name, "email": email, "password": "s3cret" }))
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn created_users_can_be_fetched(settings: AppSettings) {
    let app = init_app(settings).await;

    let (status, created) = send(&app, create_request("Ada", "ada@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());

    let uri = format!("{PREFIX}/{}", created["id"]);
    let (status, fetched) = send(&app, TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[rstest]
#[case(json!({ "name": "Ada", "email": "not-an-address", "password": "pw" }), "email", "email")]
#[case(json!({ "name": "Ada", "password": "pw" }), "email", "missing_field")]
#[actix_web::test]
async fn invalid_create_bodies_list_field_issues(
    settings: AppSettings,
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = init_app(settings).await;
    let request = TestRequest::post().uri(PREFIX).set_json(body).to_request();
    let (status, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["errors"][0]["field"], field);
    assert_eq!(error["details"]["errors"][0]["code"], code);
    assert!(error["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn non_object_bodies_are_rejected(settings: AppSettings) {
    let app = init_app(settings).await;
    let request = TestRequest::post()
        .uri(PREFIX)
        .set_json(json!(["Ada", "ada@example.com"]))
        .to_request();
    let (status, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["code"], "unsupported_source");
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_error_payload(settings: AppSettings) {
    let app = init_app(settings).await;
    let request = TestRequest::post()
        .uri(PREFIX)
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let (status, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn listing_pages_through_users_in_creation_order(settings: AppSettings) {
    let app = init_app(settings).await;
    for (name, email) in [
        ("Ada", "ada@example.com"),
        ("Grace", "grace@example.com"),
        ("Edsger", "edsger@example.com"),
    ] {
        let (status, _) = send(&app, create_request(name, email)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let uri = format!("{PREFIX}?skip=1&limit=1");
    let (status, page) = send(&app, TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["count"], 1);
    assert_eq!(page["total_count"], 3);
    assert_eq!(page["skip"], 1);
    assert_eq!(page["limit"], 1);
    assert_eq!(page["data"][0]["name"], "Grace");
}

#[rstest]
#[actix_web::test]
async fn invalid_query_strings_are_bad_requests(settings: AppSettings) {
    let app = init_app(settings).await;
    let uri = format!("{PREFIX}?limit=lots");
    let (status, error) = send(&app, TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn patch_merges_only_supplied_fields(settings: AppSettings) {
    let app = init_app(settings).await;
    let (_, created) = send(&app, create_request("Ada", "ada@example.com")).await;
    let uri = format!("{PREFIX}/{}", created["id"]);

    let request = TestRequest::patch()
        .uri(&uri)
        .set_json(json!({ "email": "ada@example.org", "password": "n3w" }))
        .to_request();
    let (status, updated) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ada");
    assert_eq!(updated["email"], "ada@example.org");

    let request = TestRequest::patch()
        .uri(&uri)
        .set_json(json!({ "name": "Ada King", "email": "ada@example.org", "password": "n3w" }))
        .to_request();
    let (_, renamed) = send(&app, request).await;
    assert_eq!(renamed["name"], "Ada King");
}

#[rstest]
#[actix_web::test]
async fn patch_of_unknown_user_is_not_found(settings: AppSettings) {
    let app = init_app(settings).await;
    let request = TestRequest::patch()
        .uri(&format!("{PREFIX}/99"))
        .set_json(json!({ "email": "ghost@example.com", "password": "pw" }))
        .to_request();
    let (status, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn routers_follow_the_configured_prefix() {
    let settings = AppSettings {
        api_v1_str: Some("/v2/".to_owned()),
        ..AppSettings::default()
    };
    let app = init_app(settings).await;

    let request = TestRequest::get().uri("/v2/users").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));

    let request = TestRequest::get().uri(PREFIX).to_request();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
