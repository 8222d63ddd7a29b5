//! Progression handler integration tests
//!
//! Driven through the router with the in-memory store, except the
//! `postgres_store` module which uses the test database when reachable.

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{id_of, json_request, parse_body, raw_json_request, ProgressionsTestApp};

async fn create(app: &ProgressionsTestApp, body: Value) -> (StatusCode, Value) {
    let resp = app
        .router()
        .oneshot(json_request(Method::POST, "/v1/progressions", Some(body)))
        .await
        .unwrap();
    let status = resp.status();
    (status, parse_body(resp).await)
}

async fn get(app: &ProgressionsTestApp, uri: &str) -> (StatusCode, Option<Value>) {
    let resp = app
        .router()
        .oneshot(json_request(Method::GET, uri, None))
        .await
        .unwrap();
    let status = resp.status();
    if status == StatusCode::OK {
        (status, Some(parse_body(resp).await))
    } else {
        (status, None)
    }
}

fn field_rule<'a>(body: &'a Value, field: &str) -> &'a Value {
    &body["error"]["fields"][field]
}

mod test_create_progression {
    use super::*;

    #[tokio::test]
    async fn test_create_returns_201_with_record() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, body) = create(
            &app,
            json!({
                "name": "Broadcast",
                "states": ["announced", "airing", "finished"],
                "project_id": project_id,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Broadcast");
        assert_eq!(body["states"], json!(["announced", "airing", "finished"]));
        assert_eq!(body["project_id"], project_id.to_string());
        assert!(body["id"].is_string());
        assert_eq!(app.store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_name_is_required() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, body) = create(
            &app,
            json!({ "states": ["airing"], "project_id": project_id }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_FIELDS");
        assert_eq!(field_rule(&body, "name"), "required");
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_null_name_is_required() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, body) = create(
            &app,
            json!({ "name": null, "states": ["airing"], "project_id": project_id }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "name"), "required");
    }

    #[tokio::test]
    async fn test_more_than_five_states_is_max() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, body) = create(
            &app,
            json!({
                "name": "Everything",
                "states": ["announced", "upcoming", "airing", "hiatus", "finished", "licensed"],
                "project_id": project_id,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "states"), "max");
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_exactly_five_states_accepted() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, body) = create(
            &app,
            json!({
                "name": "Full run",
                "states": ["announced", "upcoming", "airing", "hiatus", "finished"],
                "project_id": project_id,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["states"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_states_is_required() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, body) = create(
            &app,
            json!({ "name": "Nothing", "states": [], "project_id": project_id }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "states"), "required");
    }

    #[tokio::test]
    async fn test_duplicate_states_are_distinct() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, body) = create(
            &app,
            json!({ "name": "Loop", "states": ["airing", "airing"], "project_id": project_id }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "states"), "distinct");
    }

    #[tokio::test]
    async fn test_unknown_state_is_invalid() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, body) = create(
            &app,
            json!({ "name": "Odd", "states": ["rebooted"], "project_id": project_id }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_FIELDS");
        assert_eq!(field_rule(&body, "states"), "invalid");
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_state_reported_with_missing_fields() {
        let app = ProgressionsTestApp::new();

        let (status, body) = create(
            &app,
            json!({ "name": null, "states": ["rebooted"], "project_id": null }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "name"), "required");
        assert_eq!(field_rule(&body, "states"), "invalid");
        assert_eq!(field_rule(&body, "project_id"), "required");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let app = ProgressionsTestApp::new();

        let resp = app
            .router()
            .oneshot(raw_json_request(Method::POST, "/v1/progressions", "{not json"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_project_is_exists() {
        let app = ProgressionsTestApp::new();

        let (status, body) = create(
            &app,
            json!({ "name": "Orphan", "states": ["airing"], "project_id": Uuid::new_v4() }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "project_id"), "exists");
    }

    #[tokio::test]
    async fn test_second_progression_for_project_is_unique() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let (status, _) = create(
            &app,
            json!({ "name": "First", "states": ["airing"], "project_id": project_id }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = create(
            &app,
            json!({ "name": "Second", "states": ["finished"], "project_id": project_id }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "project_id"), "unique");
        assert_eq!(app.store.len(), 1);
    }

    #[tokio::test]
    async fn test_all_field_errors_reported_together() {
        let app = ProgressionsTestApp::new();

        let (status, body) = create(&app, json!({})).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "name"), "required");
        assert_eq!(field_rule(&body, "states"), "required");
        assert_eq!(field_rule(&body, "project_id"), "required");
    }

    #[tokio::test]
    async fn test_concurrent_creates_leave_one_progression_per_project() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mushishi");

        let attempts = (0..8).map(|i| {
            let router = app.router();
            async move {
                router
                    .oneshot(json_request(
                        Method::POST,
                        "/v1/progressions",
                        Some(json!({
                            "name": format!("Attempt {}", i),
                            "states": ["airing"],
                            "project_id": project_id,
                        })),
                    ))
                    .await
                    .unwrap()
                    .status()
            }
        });

        let handles: Vec<_> = attempts.map(tokio::spawn).collect();
        let mut created = 0;
        for handle in handles {
            let status = handle.await.unwrap();
            if status == StatusCode::CREATED {
                created += 1;
            } else {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            }
        }

        assert_eq!(created, 1);
        assert_eq!(app.store.len(), 1);
    }
}

mod test_read_progression {
    use super::*;

    #[tokio::test]
    async fn test_get_by_id_and_by_project() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Haibane Renmei");

        let (_, created) = create(
            &app,
            json!({ "name": "Run", "states": ["upcoming"], "project_id": project_id }),
        )
        .await;
        let id = id_of(&created);

        let (status, body) = get(&app, &format!("/v1/progressions/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["name"], "Run");

        let (status, body) = get(&app, &format!("/v1/projects/{}/progression", project_id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap()["id"], id.to_string());
    }

    #[tokio::test]
    async fn test_get_unknown_returns_404() {
        let app = ProgressionsTestApp::new();

        let (status, _) = get(&app, &format!("/v1/progressions/{}", Uuid::new_v4())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let project_id = app.add_project("Untracked");
        let (status, _) = get(&app, &format!("/v1/projects/{}/progression", project_id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_uuid_in_path_returns_400() {
        let app = ProgressionsTestApp::new();

        let resp = app
            .router()
            .oneshot(json_request(Method::GET, "/v1/progressions/not-a-uuid", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_pagination_returns_400_envelope() {
        let app = ProgressionsTestApp::new();

        let resp = app
            .router()
            .oneshot(json_request(Method::GET, "/v1/progressions?limit=lots", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_includes_project_title_and_page_bounds() {
        let app = ProgressionsTestApp::new();
        for title in ["Planetes", "Kaiba", "Dennou Coil"] {
            let project_id = app.add_project(title);
            let (status, _) = create(
                &app,
                json!({ "name": title, "states": ["finished"], "project_id": project_id }),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = get(&app, "/v1/progressions?limit=2").await;
        let body = body.unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["limit"], 2);
        assert_eq!(body["offset"], 0);

        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row["project_title"], row["name"]);
        }

        let (_, body) = get(&app, "/v1/progressions?offset=2&limit=2").await;
        assert_eq!(body.unwrap()["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_states() {
        let app = ProgressionsTestApp::new();

        let (status, body) = get(&app, "/v1/progressions/states").await;
        let body = body.unwrap();

        assert_eq!(status, StatusCode::OK);
        let states = body.as_array().unwrap();
        assert_eq!(states.len(), 7);
        assert_eq!(states[0]["value"], "announced");
        assert!(states.iter().all(|s| s["label"].is_string()));
    }
}

mod test_update_progression {
    use super::*;

    async fn update(app: &ProgressionsTestApp, id: Uuid, body: Value) -> (StatusCode, Value) {
        let resp = app
            .router()
            .oneshot(json_request(
                Method::PUT,
                &format!("/v1/progressions/{}", id),
                Some(body),
            ))
            .await
            .unwrap();
        let status = resp.status();
        (status, parse_body(resp).await)
    }

    #[tokio::test]
    async fn test_edit_then_read_returns_edited_values() {
        let app = ProgressionsTestApp::new();
        let first = app.add_project("Kino's Journey");
        let second = app.add_project("Kino's Journey (2017)");

        let (_, created) = create(
            &app,
            json!({ "name": "Original", "states": ["announced"], "project_id": first }),
        )
        .await;
        let id = id_of(&created);

        let (status, _) = update(
            &app,
            id,
            json!({
                "name": "Remake",
                "states": ["upcoming", "airing", "licensed"],
                "project_id": second,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = get(&app, &format!("/v1/progressions/{}", id)).await;
        let body = body.unwrap();
        assert_eq!(body["name"], "Remake");
        assert_eq!(body["states"], json!(["upcoming", "airing", "licensed"]));
        assert_eq!(body["project_id"], second.to_string());
        assert_eq!(body["created_at"], created["created_at"]);
    }

    #[tokio::test]
    async fn test_edit_keeping_own_project_is_allowed() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Mononoke");

        let (_, created) = create(
            &app,
            json!({ "name": "Run", "states": ["airing"], "project_id": project_id }),
        )
        .await;

        let (status, body) = update(
            &app,
            id_of(&created),
            json!({ "name": "Run", "states": ["airing", "finished"], "project_id": project_id }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["states"], json!(["airing", "finished"]));
    }

    #[tokio::test]
    async fn test_edit_onto_taken_project_is_unique() {
        let app = ProgressionsTestApp::new();
        let a = app.add_project("Paranoia Agent");
        let b = app.add_project("Paprika");

        create(&app, json!({ "name": "A", "states": ["airing"], "project_id": a })).await;
        let (_, second) = create(
            &app,
            json!({ "name": "B", "states": ["airing"], "project_id": b }),
        )
        .await;

        let (status, body) = update(
            &app,
            id_of(&second),
            json!({ "name": "B", "states": ["airing"], "project_id": a }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "project_id"), "unique");

        // the failed edit wrote nothing
        let (_, body) = get(&app, &format!("/v1/progressions/{}", id_of(&second))).await;
        assert_eq!(body.unwrap()["project_id"], b.to_string());
    }

    #[tokio::test]
    async fn test_edit_unknown_returns_404() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Texhnolyze");

        let (status, _) = update(
            &app,
            Uuid::new_v4(),
            json!({ "name": "Ghost", "states": ["airing"], "project_id": project_id }),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_edit_with_too_many_states_is_max() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Ergo Proxy");

        let (_, created) = create(
            &app,
            json!({ "name": "Run", "states": ["airing"], "project_id": project_id }),
        )
        .await;

        let (status, body) = update(
            &app,
            id_of(&created),
            json!({
                "name": "Run",
                "states": ["announced", "upcoming", "airing", "hiatus", "finished", "cancelled"],
                "project_id": project_id,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(field_rule(&body, "states"), "max");
    }
}

mod test_delete_progression {
    use super::*;

    async fn delete(app: &ProgressionsTestApp, id: Uuid) -> StatusCode {
        app.router()
            .oneshot(json_request(
                Method::DELETE,
                &format!("/v1/progressions/{}", id),
                None,
            ))
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_delete_then_lookup_is_not_found() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Serial Experiments Lain");

        let (_, created) = create(
            &app,
            json!({ "name": "Run", "states": ["finished"], "project_id": project_id }),
        )
        .await;
        let id = id_of(&created);

        assert_eq!(delete(&app, id).await, StatusCode::NO_CONTENT);

        let (status, _) = get(&app, &format!("/v1/progressions/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(delete(&app, id).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_frees_project_for_new_progression() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Boogiepop");

        let (_, created) = create(
            &app,
            json!({ "name": "Old", "states": ["cancelled"], "project_id": project_id }),
        )
        .await;
        delete(&app, id_of(&created)).await;

        let (status, _) = create(
            &app,
            json!({ "name": "New", "states": ["announced"], "project_id": project_id }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_removing_project_cascades() {
        let app = ProgressionsTestApp::new();
        let project_id = app.add_project("Gankutsuou");

        let (_, created) = create(
            &app,
            json!({ "name": "Run", "states": ["finished"], "project_id": project_id }),
        )
        .await;

        assert!(app.store.remove_project(project_id));

        let (status, _) = get(&app, &format!("/v1/progressions/{}", id_of(&created))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

/// Same flows against `ProgressionRepository` and a real database
mod postgres_store {
    use std::sync::Arc;

    use axum::Router;
    use showcase_progressions::{ProgressionRepository, ProgressionsState};

    use super::*;
    use crate::common::{unique_title, CatalogTestApp};

    fn router(app: &CatalogTestApp) -> Router {
        let state = ProgressionsState::new(Arc::new(ProgressionRepository::new(app.pool.clone())));
        showcase_progressions::routes().with_state(state)
    }

    async fn insert_project(app: &CatalogTestApp) -> Uuid {
        let resp = app
            .router()
            .oneshot(json_request(
                Method::POST,
                "/v1/projects",
                Some(json!({ "title": unique_title("Progression target") })),
            ))
            .await
            .unwrap();
        let id = id_of(&parse_body(resp).await);
        app.track_project(id);
        id
    }

    #[tokio::test]
    async fn test_unique_constraint_enforced() {
        let Some(app) = CatalogTestApp::connect().await else {
            return;
        };
        let project_id = insert_project(&app).await;

        let body = json!({ "name": "Run", "states": ["airing"], "project_id": project_id });
        let first = router(&app)
            .oneshot(json_request(Method::POST, "/v1/progressions", Some(body.clone())))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = router(&app)
            .oneshot(json_request(Method::POST, "/v1/progressions", Some(body)))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = parse_body(second).await;
        assert_eq!(field_rule(&body, "project_id"), "unique");

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_states_round_trip_in_order() {
        let Some(app) = CatalogTestApp::connect().await else {
            return;
        };
        let project_id = insert_project(&app).await;

        let resp = router(&app)
            .oneshot(json_request(
                Method::POST,
                "/v1/progressions",
                Some(json!({
                    "name": "Run",
                    "states": ["licensed", "announced", "airing"],
                    "project_id": project_id,
                })),
            ))
            .await
            .unwrap();
        let id = id_of(&parse_body(resp).await);

        let resp = router(&app)
            .oneshot(json_request(Method::GET, &format!("/v1/progressions/{}", id), None))
            .await
            .unwrap();
        let body = parse_body(resp).await;
        assert_eq!(body["states"], json!(["licensed", "announced", "airing"]));

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_project_delete_cascades_to_progression() {
        let Some(app) = CatalogTestApp::connect().await else {
            return;
        };
        let project_id = insert_project(&app).await;

        let resp = router(&app)
            .oneshot(json_request(
                Method::POST,
                "/v1/progressions",
                Some(json!({ "name": "Run", "states": ["airing"], "project_id": project_id })),
            ))
            .await
            .unwrap();
        let id = id_of(&parse_body(resp).await);

        let resp = app
            .router()
            .oneshot(json_request(
                Method::DELETE,
                &format!("/v1/projects/{}", project_id),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = router(&app)
            .oneshot(json_request(Method::GET, &format!("/v1/progressions/{}", id), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        app.cleanup().await.unwrap();
    }
}
