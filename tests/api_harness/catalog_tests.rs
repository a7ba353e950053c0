//! Catalog API contract test macro.
//!
//! `catalog_api_tests!` generates HTTP-level tests for the address, cinema,
//! movie and session endpoints against whatever stores the factory wires in.
//!
//! # Generated Tests
//!
//! ## Addresses
//! - create returns 201, `Location` and the entity
//! - missing and blank fields are reported per field
//! - long text round-trips on every backend
//! - unknown ids give 404 on GET and PUT
//! - partial update overwrites only the given fields
//! - pagination: 10 per page, pages below 1 read as the first
//!
//! ## Cinemas
//! - dangling and already-used addresses are rejected
//! - relationships are hidden unless included (case-insensitive)
//! - `addressId` filter and address moves
//!
//! ## Movies
//! - field rules, full update, JSON Patch (valid, invalid, malformed)
//! - `cinemaName` filter and `include=sessions`
//!
//! ## Sessions
//! - composite `Location`, duplicates, dangling references
//! - nested relationships follow the keep-list
//! - re-keying with PUT

/// Generate the catalog contract suite.
///
/// `$server_factory` must evaluate to a fresh `axum_test::TestServer`; it
/// is re-evaluated for each test.
#[macro_export]
macro_rules! catalog_api_tests {
    ($server_factory:expr) => {
        mod catalog_api_contract_tests {
            use super::*;
            use axum::http::StatusCode;
            use serde_json::{Value, json};

            // ==============================================================
            // Addresses
            // ==============================================================

            #[tokio::test]
            async fn test_create_address() {
                let server = $server_factory;

                let response = server
                    .post("/address")
                    .json(&json!({"street": "Rua Augusta", "number": "1500"}))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                let id = body["id"].as_i64().unwrap();
                assert_eq!(body["street"], "Rua Augusta");
                assert_eq!(body["number"], "1500");
                assert_eq!(
                    response.header("location").to_str().unwrap(),
                    format!("/address/{}", id)
                );
                assert!(body.get("cinema").is_none());
            }

            #[tokio::test]
            async fn test_create_address_reports_missing_fields() {
                let server = $server_factory;

                let response = server.post("/address").json(&json!({"street": "Main"})).await;

                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["number"]);
            }

            #[tokio::test]
            async fn test_blank_strings_count_as_missing() {
                let server = $server_factory;

                let response = server
                    .post("/address")
                    .json(&json!({"street": "", "number": "   "}))
                    .await;
                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["number", "street"]);

                let response = server
                    .post("/movie")
                    .json(&json!({"title": "", "genre": " ", "duration": 90}))
                    .await;
                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["genre", "title"]);

                let address_id = create_address(&server, "Main", "1").await;
                let response = server
                    .post("/cinema")
                    .json(&json!({"name": "", "addressId": address_id}))
                    .await;
                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["name"]);

                let response = server
                    .put(&format!("/address/{}", address_id))
                    .json(&json!({"street": "\t"}))
                    .await;
                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["street"]);

                let all: Vec<Value> = server.get("/movie").await.json();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_long_text_is_stored() {
                let server = $server_factory;
                let title = "t".repeat(300);
                let street = "s".repeat(300);

                let id = create_movie(&server, &title, "Drama", 90).await;
                let body: Value = server.get(&format!("/movie/{}", id)).await.json();
                assert_eq!(body["title"], title.as_str());

                let id = create_address(&server, &street, &"9".repeat(300)).await;
                let body: Value = server.get(&format!("/address/{}", id)).await.json();
                assert_eq!(body["street"], street.as_str());
            }

            #[tokio::test]
            async fn test_malformed_body_is_invalid_json() {
                let server = $server_factory;

                let response = server
                    .post("/address")
                    .bytes("{\"street\": ".into())
                    .content_type("application/json")
                    .await;

                assert_error(&response, StatusCode::BAD_REQUEST, "INVALID_JSON");
            }

            #[tokio::test]
            async fn test_unknown_address_is_404() {
                let server = $server_factory;

                let response = server.get("/address/999").await;
                assert_error(&response, StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND");

                let response = server
                    .put("/address/999")
                    .json(&json!({"street": "Nowhere"}))
                    .await;
                assert_error(&response, StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_partial_address_update() {
                let server = $server_factory;
                let id = create_address(&server, "Main", "12").await;

                server
                    .put(&format!("/address/{}", id))
                    .json(&json!({"number": "12B"}))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let body: Value = server.get(&format!("/address/{}", id)).await.json();
                assert_eq!(body["street"], "Main");
                assert_eq!(body["number"], "12B");
            }

            #[tokio::test]
            async fn test_address_pagination() {
                let server = $server_factory;
                for i in 0..12 {
                    create_address(&server, &format!("Street {}", i), "1").await;
                }

                let first: Vec<Value> = server.get("/address").await.json();
                let second: Vec<Value> = server
                    .get("/address")
                    .add_query_param("page", 2)
                    .await
                    .json();
                let below_one: Vec<Value> = server
                    .get("/address")
                    .add_query_param("page", 0)
                    .await
                    .json();

                assert_eq!(first.len(), 10);
                assert_eq!(second.len(), 2);
                assert_eq!(below_one, first);
                assert!(first.iter().all(|a| !second.contains(a)));

                let far: Vec<Value> = server
                    .get("/address")
                    .add_query_param("page", i64::MAX)
                    .await
                    .json();
                assert!(far.is_empty());

                let ids: Vec<i64> = first.iter().map(|a| a["id"].as_i64().unwrap()).collect();
                let mut sorted = ids.clone();
                sorted.sort();
                assert_eq!(ids, sorted);
            }

            // ==============================================================
            // Cinemas
            // ==============================================================

            #[tokio::test]
            async fn test_cinema_rejects_dangling_address() {
                let server = $server_factory;

                let response = server
                    .post("/cinema")
                    .json(&json!({"name": "Roxy", "addressId": 404}))
                    .await;

                let body = assert_error(&response, StatusCode::BAD_REQUEST, "INVALID_REFERENCE");
                assert_eq!(body["details"]["field"], "addressId");
            }

            #[tokio::test]
            async fn test_address_hosts_one_cinema() {
                let server = $server_factory;
                let address_id = create_address(&server, "Main", "1").await;
                create_cinema(&server, "Roxy", address_id).await;

                let response = server
                    .post("/cinema")
                    .json(&json!({"name": "Odeon", "addressId": address_id}))
                    .await;

                assert_error(&response, StatusCode::CONFLICT, "ENTITY_ALREADY_EXISTS");
            }

            #[tokio::test]
            async fn test_cinema_name_limit() {
                let server = $server_factory;
                let address_id = create_address(&server, "Main", "1").await;

                let response = server
                    .post("/cinema")
                    .json(&json!({"name": "x".repeat(51), "addressId": address_id}))
                    .await;

                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["name"]);
            }

            #[tokio::test]
            async fn test_cinema_relationships_are_opt_in() {
                let server = $server_factory;
                let address_id = create_address(&server, "Main", "7").await;
                let cinema_id = create_cinema(&server, "Roxy", address_id).await;
                let movie_id = create_movie(&server, "Alien", "Horror", 117).await;
                create_session(&server, cinema_id, movie_id).await;

                let plain: Value = server.get(&format!("/cinema/{}", cinema_id)).await.json();
                assert_eq!(plain["addressId"], address_id);
                assert!(plain.get("address").is_none());
                assert!(plain.get("sessions").is_none());

                let included: Value = server
                    .get(&format!("/cinema/{}", cinema_id))
                    .add_query_param("include", "ADDRESS,sessions")
                    .await
                    .json();
                assert_eq!(included["address"]["number"], "7");
                assert_eq!(included["sessions"].as_array().unwrap().len(), 1);
                // nested session relationships were not loaded
                assert!(included["sessions"][0].get("movie").is_none());
            }

            #[tokio::test]
            async fn test_cinema_list_by_address() {
                let server = $server_factory;
                let first = create_address(&server, "Main", "1").await;
                let second = create_address(&server, "Side", "2").await;
                create_cinema(&server, "Roxy", first).await;
                create_cinema(&server, "Odeon", second).await;

                let cinemas: Vec<Value> = server
                    .get("/cinema")
                    .add_query_param("addressId", second)
                    .await
                    .json();

                assert_eq!(cinemas.len(), 1);
                assert_eq!(cinemas[0]["name"], "Odeon");
            }

            #[tokio::test]
            async fn test_cinema_update_and_move() {
                let server = $server_factory;
                let first = create_address(&server, "Main", "1").await;
                let second = create_address(&server, "Side", "2").await;
                let third = create_address(&server, "Back", "3").await;
                let roxy = create_cinema(&server, "Roxy", first).await;
                create_cinema(&server, "Odeon", second).await;

                server
                    .put(&format!("/cinema/{}", roxy))
                    .json(&json!({"name": "Roxy II", "addressId": third}))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                let body: Value = server.get(&format!("/cinema/{}", roxy)).await.json();
                assert_eq!(body["name"], "Roxy II");
                assert_eq!(body["addressId"], third);

                let response = server
                    .put(&format!("/cinema/{}", roxy))
                    .json(&json!({"name": "Roxy II", "addressId": second}))
                    .await;
                assert_error(&response, StatusCode::CONFLICT, "ENTITY_ALREADY_EXISTS");

                let response = server
                    .put("/cinema/999")
                    .json(&json!({"name": "Ghost"}))
                    .await;
                assert_error(&response, StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND");
            }

            // ==============================================================
            // Movies
            // ==============================================================

            #[tokio::test]
            async fn test_create_movie() {
                let server = $server_factory;

                let response = server
                    .post("/movie")
                    .json(&json!({"title": "Heat", "genre": "Crime", "duration": 170}))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["title"], "Heat");
                assert_eq!(body["duration"], 170);
                assert!(body.get("sessions").is_none());
                assert_eq!(
                    response.header("location").to_str().unwrap(),
                    format!("/movie/{}", body["id"])
                );
            }

            #[tokio::test]
            async fn test_movie_field_rules() {
                let server = $server_factory;

                let response = server
                    .post("/movie")
                    .json(&json!({"genre": "A genre that is far too long", "duration": 501}))
                    .await;

                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["duration", "genre", "title"]);

                let response = server
                    .post("/movie")
                    .json(&json!({"title": "Blank", "genre": "Drama", "duration": 0}))
                    .await;
                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["duration"]);
            }

            #[tokio::test]
            async fn test_movie_full_update() {
                let server = $server_factory;
                let id = create_movie(&server, "Alien", "Horror", 117).await;

                server
                    .put(&format!("/movie/{}", id))
                    .json(&json!({"title": "Aliens", "genre": "Action", "duration": 137}))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);

                let body: Value = server.get(&format!("/movie/{}", id)).await.json();
                assert_eq!(body["title"], "Aliens");
                assert_eq!(body["genre"], "Action");
                assert_eq!(body["duration"], 137);

                let response = server
                    .put(&format!("/movie/{}", id))
                    .json(&json!({"title": "Aliens", "genre": "Action"}))
                    .await;
                assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
            }

            #[tokio::test]
            async fn test_movie_json_patch() {
                let server = $server_factory;
                let id = create_movie(&server, "Alien", "Horror", 117).await;
                let path = format!("/movie/{}", id);

                server
                    .patch(&path)
                    .json(&json!([
                        {"op": "test", "path": "/title", "value": "Alien"},
                        {"op": "replace", "path": "/duration", "value": 116}
                    ]))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                let body: Value = server.get(&path).await.json();
                assert_eq!(body["duration"], 116);
                assert_eq!(body["title"], "Alien");

                // patched result must still pass the movie rules
                let response = server
                    .patch(&path)
                    .json(&json!([{"op": "replace", "path": "/duration", "value": 0}]))
                    .await;
                assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                let body: Value = server.get(&path).await.json();
                assert_eq!(body["duration"], 116);

                let response = server
                    .patch(&path)
                    .json(&json!([{"op": "replace", "path": "/title", "value": ""}]))
                    .await;
                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["title"]);
                let body: Value = server.get(&path).await.json();
                assert_eq!(body["title"], "Alien");

                let response = server
                    .patch(&path)
                    .json(&json!([{"op": "replace", "path": "/missing", "value": 1}]))
                    .await;
                assert_error(&response, StatusCode::BAD_REQUEST, "INVALID_PATCH");

                let response = server
                    .patch(&path)
                    .json(&json!({"title": "not a patch document"}))
                    .await;
                assert_error(&response, StatusCode::BAD_REQUEST, "INVALID_PATCH");

                let response = server
                    .patch("/movie/999")
                    .json(&json!([{"op": "replace", "path": "/duration", "value": 90}]))
                    .await;
                assert_error(&response, StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_movies_by_cinema_name() {
                let server = $server_factory;
                let roxy = create_cinema_with_address(&server, "Roxy Palace").await;
                let odeon = create_cinema_with_address(&server, "Odeon").await;
                let alien = create_movie(&server, "Alien", "Horror", 117).await;
                let heat = create_movie(&server, "Heat", "Crime", 170).await;
                create_movie(&server, "Unscreened", "Drama", 90).await;
                create_session(&server, roxy, alien).await;
                create_session(&server, odeon, heat).await;
                create_session(&server, odeon, alien).await;

                let movies: Vec<Value> = server
                    .get("/movie")
                    .add_query_param("cinemaName", "Roxy")
                    .await
                    .json();
                assert_eq!(movies.len(), 1);
                assert_eq!(movies[0]["title"], "Alien");

                let movies: Vec<Value> = server
                    .get("/movie")
                    .add_query_param("cinemaName", "Odeon")
                    .await
                    .json();
                let titles: Vec<&str> = movies.iter().map(|m| m["title"].as_str().unwrap()).collect();
                assert_eq!(titles, vec!["Alien", "Heat"]);

                let all: Vec<Value> = server.get("/movie").await.json();
                assert_eq!(all.len(), 3);
            }

            #[tokio::test]
            async fn test_movie_include_sessions() {
                let server = $server_factory;
                let cinema = create_cinema_with_address(&server, "Roxy").await;
                let movie = create_movie(&server, "Alien", "Horror", 117).await;
                create_session(&server, cinema, movie).await;

                let movies: Vec<Value> = server
                    .get("/movie")
                    .add_query_param("include", "sessions")
                    .await
                    .json();
                assert_eq!(movies[0]["sessions"][0]["cinemaId"], cinema);
            }

            // ==============================================================
            // Sessions
            // ==============================================================

            #[tokio::test]
            async fn test_create_session() {
                let server = $server_factory;
                let cinema = create_cinema_with_address(&server, "Roxy").await;
                let movie = create_movie(&server, "Alien", "Horror", 117).await;

                let response = server
                    .post("/session")
                    .json(&json!({"cinemaId": cinema, "movieId": movie}))
                    .await;

                response.assert_status(StatusCode::CREATED);
                assert_eq!(
                    response.header("location").to_str().unwrap(),
                    format!("/session/{}/{}", cinema, movie)
                );
                let body: Value = response.json();
                assert_eq!(body, json!({"movieId": movie, "cinemaId": cinema}));

                let response = server
                    .post("/session")
                    .json(&json!({"cinemaId": cinema, "movieId": movie}))
                    .await;
                assert_error(&response, StatusCode::CONFLICT, "ENTITY_ALREADY_EXISTS");
            }

            #[tokio::test]
            async fn test_session_rejects_dangling_references() {
                let server = $server_factory;
                let cinema = create_cinema_with_address(&server, "Roxy").await;

                let response = server
                    .post("/session")
                    .json(&json!({"cinemaId": cinema, "movieId": 404}))
                    .await;
                let body = assert_error(&response, StatusCode::BAD_REQUEST, "INVALID_REFERENCE");
                assert_eq!(body["details"]["field"], "movieId");

                let response = server.post("/session").json(&json!({"cinemaId": cinema})).await;
                let body = assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
                assert_eq!(error_fields(&body), vec!["movieId"]);
            }

            #[tokio::test]
            async fn test_session_nested_relationships_follow_keep_list() {
                let server = $server_factory;
                let cinema = create_cinema_with_address(&server, "Roxy").await;
                let movie = create_movie(&server, "Alien", "Horror", 117).await;
                create_session(&server, cinema, movie).await;
                let path = format!("/session/{}/{}", cinema, movie);

                let plain: Value = server.get(&path).await.json();
                assert_eq!(plain, json!({"movieId": movie, "cinemaId": cinema}));

                let body: Value = server
                    .get(&path)
                    .add_query_param("include", "cinema,movie")
                    .await
                    .json();
                assert_eq!(body["movie"]["title"], "Alien");
                assert_eq!(body["cinema"]["name"], "Roxy");
                assert!(body["cinema"].get("address").is_none());
                assert!(body["movie"].get("sessions").is_none());

                let listed: Vec<Value> = server
                    .get("/session")
                    .add_query_param("include", "movie")
                    .await
                    .json();
                assert_eq!(listed[0]["movie"]["id"], movie);
                assert!(listed[0].get("cinema").is_none());
            }

            #[tokio::test]
            async fn test_session_rekey() {
                let server = $server_factory;
                let cinema = create_cinema_with_address(&server, "Roxy").await;
                let alien = create_movie(&server, "Alien", "Horror", 117).await;
                let heat = create_movie(&server, "Heat", "Crime", 170).await;
                let ran = create_movie(&server, "Ran", "Drama", 162).await;
                create_session(&server, cinema, alien).await;
                create_session(&server, cinema, ran).await;

                server
                    .put(&format!("/session/{}/{}", cinema, alien))
                    .json(&json!({"movieId": heat}))
                    .await
                    .assert_status(StatusCode::NO_CONTENT);
                server
                    .get(&format!("/session/{}/{}", cinema, alien))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .get(&format!("/session/{}/{}", cinema, heat))
                    .await
                    .assert_status_ok();

                let response = server
                    .put(&format!("/session/{}/{}", cinema, heat))
                    .json(&json!({"movieId": ran}))
                    .await;
                assert_error(&response, StatusCode::CONFLICT, "ENTITY_ALREADY_EXISTS");

                let response = server
                    .put(&format!("/session/{}/{}", cinema, heat))
                    .json(&json!({"movieId": 404}))
                    .await;
                assert_error(&response, StatusCode::BAD_REQUEST, "INVALID_REFERENCE");

                let response = server
                    .put(&format!("/session/{}/{}", cinema, alien))
                    .json(&json!({"movieId": heat}))
                    .await;
                assert_error(&response, StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND");
            }
        }
    };
}
