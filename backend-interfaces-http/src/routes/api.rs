use axum::routing::{delete, get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{booking_handlers, event_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/events",
            get(event_handlers::list_events).post(event_handlers::create_event),
        )
        .route("/api/events/mine", get(event_handlers::list_my_events))
        .route(
            "/api/events/:id",
            get(event_handlers::get_event)
                .put(event_handlers::update_event)
                .delete(event_handlers::delete_event),
        )
        .route(
            "/api/events/:id/bookings",
            post(event_handlers::book_event),
        )
        .route("/api/bookings", get(booking_handlers::list_bookings))
        .route("/api/bookings/:id", delete(booking_handlers::cancel_booking))
        .route("/api/ops/health/live", get(ops_handlers::health_live))
        .route("/api/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/api/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use backend_application::Metrics;
    use backend_domain::RuntimeConfig;
    use backend_infrastructure::{
        FixtureCatalog, IdentityEntry, InMemoryStore, StaticIdentityProvider,
    };

    const ORGANIZER: &str = "tok-org";
    const OTHER_ORGANIZER: &str = "tok-org-2";
    const ANN: &str = "tok-ann";
    const BOB: &str = "tok-bob";
    const CAROL: &str = "tok-carol";

    fn identity(token: &str, id: &str, role: &str) -> IdentityEntry {
        IdentityEntry {
            token: token.to_string(),
            id: id.to_string(),
            name: id.to_string(),
            role: role.to_string(),
        }
    }

    fn test_state() -> AppState {
        let store = Arc::new(InMemoryStore::new());
        let identity = StaticIdentityProvider::from_entries(&[
            identity(ORGANIZER, "org-1", "organizer"),
            identity(OTHER_ORGANIZER, "org-2", "organizer"),
            identity(ANN, "ann", "attendee"),
            identity(BOB, "bob", "attendee"),
            identity(CAROL, "carol", "attendee"),
        ])
        .expect("identities");
        let catalog = FixtureCatalog::new(vec![json!({
            "id": "777",
            "name": {"text": "Riverfront Jazz Festival"},
            "start": {"local": "2030-07-04T18:30:00"},
            "category": {"name": "Music"},
            "url": "https://tickets.example/777"
        })]);
        AppState {
            config: RuntimeConfig::default(),
            event_store: store.clone(),
            ledger: store,
            catalog: Arc::new(catalog),
            identity: Arc::new(identity),
            metrics: Arc::new(Metrics::default()),
        }
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn workshop(capacity: u32) -> Value {
        json!({
            "name": "Community Garden Workshop",
            "description": "Learn organic gardening",
            "date": "2030-09-10",
            "time": "10:00",
            "location": "Community Center, Falmouth KY",
            "capacity": capacity,
            "type": "Workshop",
            "attendees": 500,
            "isExternal": true
        })
    }

    async fn create(app: &Router, capacity: u32) -> String {
        let (status, body) =
            send(app, "POST", "/api/events", Some(ORGANIZER), Some(workshop(capacity))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["event"]["id"].as_str().expect("event id").to_string()
    }

    #[tokio::test]
    async fn create_ignores_client_supplied_attendance() {
        let app = build_router(test_state());
        let (status, body) =
            send(&app, "POST", "/api/events", Some(ORGANIZER), Some(workshop(30))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["event"]["attendees"], 0);
        assert_eq!(body["event"]["isExternal"], false);
        assert_eq!(body["event"]["organizerId"], "org-1");
    }

    #[tokio::test]
    async fn create_requires_identity_and_organizer_role() {
        let app = build_router(test_state());
        let (status, body) = send(&app, "POST", "/api/events", None, Some(workshop(10))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, _) =
            send(&app, "POST", "/api/events", Some("forged"), Some(workshop(10))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "POST", "/api/events", Some(ANN), Some(workshop(10))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) =
            send(&app, "POST", "/api/events", Some(ORGANIZER), Some(workshop(0))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = build_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/api/events")
            .header("Authorization", format!("Bearer {ORGANIZER}"))
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn capacity_two_scenario_over_http() {
        let app = build_router(test_state());
        let event_id = create(&app, 2).await;
        let book_uri = format!("/api/events/{event_id}/bookings");

        let (status, body) = send(&app, "POST", &book_uri, Some(ANN), None).await;
        assert_eq!(status, StatusCode::CREATED);
        let ann_booking = body["booking"]["id"].as_str().expect("booking id").to_string();
        let (status, _) = send(&app, "POST", &book_uri, Some(BOB), None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "POST", &book_uri, Some(CAROL), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, "POST", &book_uri, Some(BOB), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let cancel_uri = format!("/api/bookings/{ann_booking}");
        let (status, _) = send(&app, "DELETE", &cancel_uri, Some(BOB), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, body) = send(&app, "DELETE", &cancel_uri, Some(ANN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].is_string());

        let (status, _) = send(&app, "POST", &book_uri, Some(CAROL), None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = send(&app, "GET", &format!("/api/events/{event_id}"), None, None).await;
        assert_eq!(body["event"]["attendees"], 2);
        assert_eq!(body["event"]["spotsLeft"], 0);

        let (status, _) = send(&app, "GET", "/api/ops/health/ready", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_with_bookings_reports_the_count() {
        let app = build_router(test_state());
        let event_id = create(&app, 5).await;
        send(&app, "POST", &format!("/api/events/{event_id}/bookings"), Some(ANN), None).await;

        let uri = format!("/api/events/{event_id}");
        let (status, _) = send(&app, "DELETE", &uri, Some(OTHER_ORGANIZER), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, body) = send(&app, "DELETE", &uri, Some(ORGANIZER), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap_or_default().contains("1 existing bookings"));

        let (status, _) = send(&app, "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn update_is_owner_only() {
        let app = build_router(test_state());
        let event_id = create(&app, 5).await;
        let uri = format!("/api/events/{event_id}");
        let patch = json!({"name": "Renamed", "attendees": 4});

        let (status, _) = send(&app, "PUT", &uri, None, Some(patch.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, "PUT", &uri, Some(OTHER_ORGANIZER), Some(patch.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, body) = send(&app, "PUT", &uri, Some(ORGANIZER), Some(patch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["name"], "Renamed");
        assert_eq!(body["event"]["attendees"], 0);

        let (status, _) =
            send(&app, "PUT", "/api/events/missing", Some(ORGANIZER), Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_accepts_capacity_sent_as_text() {
        let app = build_router(test_state());
        let event_id = create(&app, 5).await;
        let uri = format!("/api/events/{event_id}");

        let patch = json!({"name": "Community Garden Workshop", "capacity": "40"});
        let (status, body) = send(&app, "PUT", &uri, Some(ORGANIZER), Some(patch)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event"]["capacity"], 40);
        assert_eq!(body["event"]["spotsLeft"], 40);

        let patch = json!({"capacity": "forty"});
        let (status, body) = send(&app, "PUT", &uri, Some(ORGANIZER), Some(patch)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let mut draft = workshop(10);
        draft["capacity"] = json!("12");
        let (status, body) = send(&app, "POST", "/api/events", Some(ORGANIZER), Some(draft)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["event"]["capacity"], 12);
    }

    #[tokio::test]
    async fn external_event_without_link_lists_bare_and_cannot_be_booked() {
        let mut state = test_state();
        state.catalog = Arc::new(FixtureCatalog::new(vec![json!({
            "id": "888",
            "name": {"text": "Pop-up Market"},
            "start": {"local": "2030-08-01T12:00:00"},
            "url": ""
        })]));
        let app = build_router(state);

        let (status, body) = send(&app, "GET", "/api/events/external-888", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["event"].get("ticketUrl").is_none());

        let (status, body) =
            send(&app, "POST", "/api/events/external-888/bookings", Some(ANN), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.get("ticketUrl").is_none());
    }

    #[tokio::test]
    async fn listing_scopes_and_filters() {
        let app = build_router(test_state());
        create(&app, 5).await;

        let (status, body) = send(&app, "GET", "/api/events", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let events = body["events"].as_array().expect("events");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["id"], "external-777");
        assert!(events[1]["attendees"].is_null());

        let (_, body) =
            send(&app, "GET", "/api/events?scope=community&search=jazz", None, None).await;
        assert_eq!(body["events"].as_array().map(Vec::len), Some(0));

        let (_, body) = send(&app, "GET", "/api/events?type=Concert", None, None).await;
        let events = body["events"].as_array().expect("events");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["isExternal"], true);

        let (status, _) = send(&app, "GET", "/api/events?scope=galaxy", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "GET", "/api/events?type=Rave", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn external_booking_returns_ticket_link() {
        let app = build_router(test_state());
        let (status, body) =
            send(&app, "POST", "/api/events/external-777/bookings", Some(ANN), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ticketUrl"], "https://tickets.example/777");
        assert!(body.get("booking").is_none());

        let (status, _) =
            send(&app, "POST", "/api/events/external-999/bookings", Some(ANN), None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) =
            send(&app, "PUT", "/api/events/external-777", Some(ORGANIZER), Some(json!({}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn bookings_list_is_per_user_and_period_filtered() {
        let app = build_router(test_state());
        let event_id = create(&app, 5).await;
        send(&app, "POST", &format!("/api/events/{event_id}/bookings"), Some(ANN), None).await;

        let (status, body) =
            send(&app, "GET", "/api/bookings?period=upcoming", Some(ANN), None).await;
        assert_eq!(status, StatusCode::OK);
        let bookings = body["bookings"].as_array().expect("bookings");
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0]["period"], "upcoming");
        assert_eq!(bookings[0]["event"]["id"], event_id.as_str());

        let (_, body) = send(&app, "GET", "/api/bookings?period=past", Some(ANN), None).await;
        assert_eq!(body["bookings"].as_array().map(Vec::len), Some(0));
        let (_, body) = send(&app, "GET", "/api/bookings", Some(BOB), None).await;
        assert_eq!(body["bookings"].as_array().map(Vec::len), Some(0));

        let (status, _) = send(&app, "GET", "/api/bookings", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, "GET", "/api/bookings?period=someday", Some(ANN), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn organizer_view_and_ops_endpoints() {
        let app = build_router(test_state());
        create(&app, 5).await;

        let (status, body) = send(&app, "GET", "/api/events/mine", Some(ORGANIZER), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["events"].as_array().map(Vec::len), Some(1));
        let (_, body) = send(&app, "GET", "/api/events/mine", Some(OTHER_ORGANIZER), None).await;
        assert_eq!(body["events"].as_array().map(Vec::len), Some(0));

        let (status, _) = send(&app, "GET", "/api/ops/health/live", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let request = Request::builder()
            .uri("/api/ops/metrics/prometheus")
            .body(Body::empty())
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("gatherly_events_created_total 1"));
    }
}
