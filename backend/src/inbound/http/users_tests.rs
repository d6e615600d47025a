//! Handler coverage for login and member listing.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(test_utils::seeded_http_state()))
        .wrap(test_utils::test_session_middleware())
        .service(web::scope("/api/v1").service(login).service(list_users))
}

async fn login_cookie<S, B>(app: &S, username: &str) -> actix_web::cookie::Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": "hygge" }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[rstest]
#[case("   ", "hygge", "username", "empty_username")]
#[case("maja", "", "password", "empty_password")]
#[actix_web::test]
async fn login_rejects_blank_credentials(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] detail_code: &str,
) {
    let app = actix_test::init_service(test_app()).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], json!("invalid_request"));
    assert_eq!(value["details"]["field"], json!(field));
    assert_eq!(value["details"]["code"], json!(detail_code));
}

#[actix_web::test]
async fn login_rejects_wrong_credentials() {
    let app = actix_test::init_service(test_app()).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "maja", "password": "wrong" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], json!("unauthorized"));
}

#[actix_web::test]
async fn login_returns_the_acting_member() {
    let app = actix_test::init_service(test_app()).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": "maja", "password": "hygge" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .response()
            .cookies()
            .any(|cookie| cookie.name() == "session")
    );
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["displayName"], json!("Maja"));
}

#[actix_web::test]
async fn listing_members_requires_a_session() {
    let app = actix_test::init_service(test_app()).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn members_are_listed_in_camel_case() {
    let app = actix_test::init_service(test_app()).await;
    let cookie = login_cookie(&app, "maja").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    let members = value.as_array().expect("array");
    assert_eq!(members.len(), 2);
    assert!(members.iter().any(|m| m["displayName"] == json!("Maja")));
    assert!(members.iter().all(|m| m.get("display_name").is_none()));
}
