//! Identity API contract test macro.
//!
//! `identity_api_tests!` covers sign-up, login with lockout, and the
//! bearer-protected profile endpoint against any user store.

/// Generate the identity contract suite.
///
/// `$server_factory` must evaluate to a fresh `axum_test::TestServer`.
#[macro_export]
macro_rules! identity_api_tests {
    ($server_factory:expr) => {
        mod identity_api_contract_tests {
            use super::*;
            use axum::http::StatusCode;
            use cine::auth::TokenIssuer;
            use serde_json::{Value, json};

            // ==============================================================
            // Sign-up
            // ==============================================================

            #[tokio::test]
            async fn test_sign_up_opens_session() {
                let server = $server_factory;

                let body = sign_up(&server, "ana@example.com").await;

                assert_eq!(body["user"]["email"], "ana@example.com");
                assert_eq!(body["user"]["userName"], "ana@example.com");
                assert_eq!(body["user"]["role"], "Customer");
                assert_eq!(body["user"]["accessFailedCount"], 0);
                assert!(body["user"].get("passwordHash").is_none());
                assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
                assert!(body["expiresAt"].is_string());
            }

            #[tokio::test]
            async fn test_sign_up_token_lifetime() {
                let server = $server_factory;

                let body = sign_up(&server, "ana@example.com").await;
                let claims = TokenIssuer::new(SIGNING_KEY, 7)
                    .verify(body["token"].as_str().unwrap())
                    .unwrap();

                assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
                assert_eq!(claims.email, "ana@example.com");
                assert_eq!(claims.role, "Customer");
                assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
            }

            #[tokio::test]
            async fn test_sign_up_field_rules() {
                let server = $server_factory;

                let mut body = signup_body("ana@example.com");
                body["confirmPassword"] = json!("different!");
                let response = server.post("/auth/signup").json(&body).await;
                let error = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&error), vec!["confirmPassword"]);

                let mut body = signup_body("ana@example.com");
                body["role"] = json!("Superuser");
                let response = server.post("/auth/signup").json(&body).await;
                let error = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&error), vec!["role"]);

                let mut body = signup_body("not-an-email");
                body["name"] = json!("");
                let response = server.post("/auth/signup").json(&body).await;
                let error = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&error), vec!["email", "name"]);
            }

            #[tokio::test]
            async fn test_sign_up_password_policy() {
                let server = $server_factory;

                let mut body = signup_body("ana@example.com");
                body["password"] = json!("abcdef");
                body["confirmPassword"] = json!("abcdef");
                let response = server.post("/auth/signup").json(&body).await;

                let error = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                let fields = error_fields(&error);
                assert!(!fields.is_empty());
                assert!(fields.iter().all(|f| f == "password"));

                // nothing was stored
                login(&server, "ana@example.com", "abcdef")
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);
            }

            #[tokio::test]
            async fn test_sign_up_reports_every_field_at_once() {
                let server = $server_factory;

                let mut body = signup_body("not-an-email");
                body["password"] = json!("abcdef");
                body["confirmPassword"] = json!("abcdeg");
                let response = server.post("/auth/signup").json(&body).await;

                let error = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                let mut fields = error_fields(&error);
                fields.dedup();
                assert_eq!(fields, vec!["confirmPassword", "email", "password"]);
            }

            #[tokio::test]
            async fn test_malformed_sign_up_is_invalid_json() {
                let server = $server_factory;

                let response = server
                    .post("/auth/signup")
                    .json(&json!({"name": 5}))
                    .await;

                assert_error(&response, StatusCode::BAD_REQUEST, "INVALID_JSON");
            }

            #[tokio::test]
            async fn test_duplicate_email_is_generic_failure() {
                let server = $server_factory;
                sign_up(&server, "ana@example.com").await;

                let response = server
                    .post("/auth/signup")
                    .json(&signup_body("ANA@example.com"))
                    .await;

                let error = assert_error(&response, StatusCode::BAD_REQUEST, "SIGNUP_FAILED");
                assert_eq!(error["message"], "Unknown error occurred");
            }

            // ==============================================================
            // Login
            // ==============================================================

            #[tokio::test]
            async fn test_login_and_profile() {
                let server = $server_factory;
                let signed_up = sign_up(&server, "ana@example.com").await;

                let response = login(&server, "ana@example.com", PASSWORD).await;
                response.assert_status_ok();
                let session: Value = response.json();
                assert_eq!(session["user"]["id"], signed_up["user"]["id"]);

                let token = session["token"].as_str().unwrap();
                let response = server.get("/me").authorization_bearer(token).await;
                response.assert_status_ok();
                let me: Value = response.json();
                assert_eq!(me["email"], "ana@example.com");
                assert!(me.get("passwordHash").is_none());
            }

            #[tokio::test]
            async fn test_login_rejects_bad_credentials() {
                let server = $server_factory;
                sign_up(&server, "ana@example.com").await;

                let response = login(&server, "ana@example.com", "wrong!").await;
                assert_error(&response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");

                let response = login(&server, "nobody@example.com", PASSWORD).await;
                assert_error(&response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");

                let response = server
                    .post("/auth/login")
                    .json(&json!({"email": "ana@example.com", "password": PASSWORD, "isPersistent": "yes"}))
                    .await;
                let error = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&error), vec!["isPersistent"]);

                let response = server
                    .post("/auth/login")
                    .json(&json!({"email": "ana@example.com", "password": PASSWORD, "isPersistent": true}))
                    .await;
                response.assert_status_ok();
            }

            #[tokio::test]
            async fn test_repeated_failures_lock_the_account() {
                let server = $server_factory;
                sign_up(&server, "ana@example.com").await;

                for _ in 0..5 {
                    let response = login(&server, "ana@example.com", "wrong!").await;
                    assert_error(&response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");
                }

                let response = login(&server, "ana@example.com", PASSWORD).await;
                assert_error(&response, StatusCode::UNAUTHORIZED, "LOCKED_OUT");
            }

            #[tokio::test]
            async fn test_success_resets_failure_count() {
                let server = $server_factory;
                sign_up(&server, "ana@example.com").await;

                for _ in 0..4 {
                    login(&server, "ana@example.com", "wrong!").await;
                }
                let session: Value = login(&server, "ana@example.com", PASSWORD).await.json();
                assert_eq!(session["user"]["accessFailedCount"], 0);

                for _ in 0..4 {
                    login(&server, "ana@example.com", "wrong!").await;
                }
                login(&server, "ana@example.com", PASSWORD)
                    .await
                    .assert_status_ok();
            }

            // ==============================================================
            // Profile
            // ==============================================================

            #[tokio::test]
            async fn test_profile_requires_valid_token() {
                let server = $server_factory;

                let response = server.get("/me").await;
                assert_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

                let response = server.get("/me").authorization_bearer("garbage").await;
                assert_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

                let foreign = TokenIssuer::new("some-other-key", 7);
                let user = cine::auth::User::new(
                    "Eve".into(),
                    "eve@example.com".into(),
                    String::new(),
                    cine::auth::Role::Admin,
                );
                let token = foreign.issue(&user).unwrap().token;
                let response = server.get("/me").authorization_bearer(token).await;
                assert_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
            }
        }
    };
}
