// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Meridian Labs

//! HTTP surface.
//!
//! All application routes live under `/api`; Swagger UI is served at
//! `/docs` from the generated OpenAPI document.

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AdminLoginRequest, AdminLoginResponse, AdminStats, Article, ArticleInput, ArticleSummary,
        ArticlesListResponse, AuthResponse, ChangePasswordRequest, ChatRequest, ChatResponse,
        Contact, ContactRequest, InvestorInquiry, InvestorInquiryRequest, LoginRequest,
        MessageResponse, RegisterRequest, UserPublic,
    },
    state::AppState,
};

pub mod admin;
pub mod articles;
pub mod auth;
pub mod chat;
pub mod contact;
pub mod health;
pub mod investors;

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/articles", get(articles::list_articles))
        .route("/contact", post(contact::submit_contact))
        .route("/investor-inquiries", post(investors::submit_inquiry))
        .route("/chat", post(chat::send_message))
        .route("/admin/login", post(admin::login))
        .route("/admin/change-password", post(admin::change_password))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/contacts", get(admin::list_contacts))
        .route("/admin/investor-inquiries", get(admin::list_inquiries))
        .route(
            "/admin/articles",
            get(admin::list_articles).post(admin::create_article),
        )
        .route(
            "/admin/articles/{id}",
            put(admin::update_article).delete(admin::delete_article),
        )
        .with_state(state);

    Router::new()
        .route("/api/", get(health::root))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        auth::register,
        auth::login,
        auth::me,
        articles::list_articles,
        contact::submit_contact,
        investors::submit_inquiry,
        chat::send_message,
        admin::login,
        admin::change_password,
        admin::stats,
        admin::list_users,
        admin::list_contacts,
        admin::list_inquiries,
        admin::list_articles,
        admin::create_article,
        admin::update_article,
        admin::delete_article
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserPublic,
            AdminLoginRequest,
            AdminLoginResponse,
            ChangePasswordRequest,
            AdminStats,
            Article,
            ArticleSummary,
            ArticleInput,
            ArticlesListResponse,
            Contact,
            ContactRequest,
            InvestorInquiry,
            InvestorInquiryRequest,
            ChatRequest,
            ChatResponse,
            MessageResponse,
            health::RootResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Service banner and liveness"),
        (name = "Auth", description = "User registration and login"),
        (name = "Articles", description = "Public article listing"),
        (name = "Intake", description = "Contact and investor forms"),
        (name = "Chat", description = "Authenticated chat"),
        (name = "Admin", description = "Dashboard administration")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::bootstrap;
    use crate::config::Config;
    use crate::store::MemoryStore;

    async fn test_app() -> Router {
        let store: Arc<dyn crate::store::Store> = Arc::new(MemoryStore::new());
        bootstrap::ensure_default_admin(&store).await.unwrap();
        let config = Config::for_tests();
        router(AppState::new(store, &config), &config.cors_origins)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn bearer_request(method: Method, uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_alice(app: &Router) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/register",
                json!({
                    "name": "Alice",
                    "email": "alice@example.com",
                    "password": "p@ssw0rd-1",
                    "country": "US"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    async fn admin_token(app: &Router, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/admin/login",
                json!({ "username": "admin", "password": password }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_endpoints_respond() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn register_then_fetch_profile() {
        let app = test_app().await;

        let body = register_alice(&app).await;
        let token = body["token"].as_str().unwrap();
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert!(body["user"].get("password_hash").is_none());

        let response = app
            .oneshot(bearer_request(Method::GET, "/api/auth/me", token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let me = body_json(response).await;
        assert_eq!(me["name"], "Alice");
        assert_eq!(me["country"], "US");
        assert!(me.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() {
        let app = test_app().await;
        register_alice(&app).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/auth/register",
                json!({
                    "name": "Alice Again",
                    "email": "ALICE@example.com",
                    "password": "another-pass",
                    "country": "CA"
                }),
            ))
            .await
            .unwrap();
        // Email comparison is case-insensitive (stored lowercased).
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let app = test_app().await;
        register_alice(&app).await;

        let unknown_email = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                json!({ "email": "nobody@example.com", "password": "p@ssw0rd-1" }),
            ))
            .await
            .unwrap();
        let wrong_password = app
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                json!({ "email": "alice@example.com", "password": "wrong" }),
            ))
            .await
            .unwrap();

        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        let a = body_json(unknown_email).await;
        let b = body_json(wrong_password).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn admin_login_failures_are_indistinguishable() {
        let app = test_app().await;

        let unknown_username = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/admin/login",
                json!({ "username": "nobody", "password": "admin123" }),
            ))
            .await
            .unwrap();
        let wrong_password = app
            .oneshot(json_request(
                Method::POST,
                "/api/admin/login",
                json!({ "username": "admin", "password": "wrong" }),
            ))
            .await
            .unwrap();

        assert_eq!(unknown_username.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
        let a = body_json(unknown_username).await;
        let b = body_json(wrong_password).await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn bootstrap_admin_must_change_password() {
        let app = test_app().await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/admin/login",
                json!({ "username": "admin", "password": "admin123" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["requires_password_change"], true);
    }

    #[tokio::test]
    async fn change_password_rotates_credentials() {
        let app = test_app().await;
        let token = admin_token(&app, "admin123").await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/admin/change-password")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "current_password": "admin123",
                            "new_password": "a-much-better-one"
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Old password no longer works and the flag is cleared.
        let stale = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/admin/login",
                json!({ "username": "admin", "password": "admin123" }),
            ))
            .await
            .unwrap();
        assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);

        let fresh = app
            .oneshot(json_request(
                Method::POST,
                "/api/admin/login",
                json!({ "username": "admin", "password": "a-much-better-one" }),
            ))
            .await
            .unwrap();
        assert_eq!(fresh.status(), StatusCode::OK);
        let body = body_json(fresh).await;
        assert_eq!(body["requires_password_change"], false);
    }

    #[tokio::test]
    async fn change_password_with_wrong_current_leaves_hash_untouched() {
        let app = test_app().await;
        let token = admin_token(&app, "admin123").await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/admin/change-password")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "current_password": "not-the-password",
                            "new_password": "a-much-better-one"
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Original credentials still valid.
        let login = app
            .oneshot(json_request(
                Method::POST,
                "/api/admin/login",
                json!({ "username": "admin", "password": "admin123" }),
            ))
            .await
            .unwrap();
        assert_eq!(login.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn user_token_is_rejected_on_admin_routes() {
        let app = test_app().await;
        let body = register_alice(&app).await;
        let user_token = body["token"].as_str().unwrap();

        let response = app
            .oneshot(bearer_request(Method::GET, "/api/admin/stats", user_token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_token_is_rejected_on_user_routes() {
        let app = test_app().await;
        let token = admin_token(&app, "admin123").await;

        let response = app
            .oneshot(bearer_request(Method::GET, "/api/auth/me", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn article_crud_and_public_listing() {
        let app = test_app().await;
        let token = admin_token(&app, "admin123").await;

        let create = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/admin/articles")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "title": "Series A",
                            "excerpt": "We raised",
                            "category": "News",
                            "content": "Long form body"
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(create.status(), StatusCode::CREATED);
        let created = body_json(create).await;
        let id = created["id"].as_str().unwrap().to_string();

        // Public listing shows the summary but never the body.
        let listing = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/articles?search=series")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(listing.status(), StatusCode::OK);
        let page = body_json(listing).await;
        assert_eq!(page["total"], 1);
        assert_eq!(page["page"], 1);
        assert_eq!(page["total_pages"], 1);
        assert_eq!(page["articles"][0]["title"], "Series A");
        assert!(page["articles"][0].get("content").is_none());

        let update = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri(format!("/api/admin/articles/{id}"))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "title": "Series A closed",
                            "excerpt": "We raised",
                            "category": "News",
                            "content": "Long form body"
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(update.status(), StatusCode::OK);
        assert_eq!(body_json(update).await["title"], "Series A closed");

        let delete = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/api/admin/articles/{id}"))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(delete.status(), StatusCode::OK);

        let gone = app
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/api/admin/articles/{id}"))
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn intake_forms_feed_admin_stats() {
        let app = test_app().await;

        let contact = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/contact",
                json!({
                    "name": "Bob",
                    "email": "bob@example.com",
                    "subject": "Hello",
                    "message": "Just saying hi"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(contact.status(), StatusCode::CREATED);

        let inquiry = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/investor-inquiries",
                json!({
                    "name": "Carol",
                    "email": "carol@fund.example",
                    "company": "Fund LP",
                    "investment_range": ""
                }),
            ))
            .await
            .unwrap();
        assert_eq!(inquiry.status(), StatusCode::CREATED);

        let token = admin_token(&app, "admin123").await;
        let stats = app
            .clone()
            .oneshot(bearer_request(Method::GET, "/api/admin/stats", &token))
            .await
            .unwrap();
        assert_eq!(stats.status(), StatusCode::OK);
        let body = body_json(stats).await;
        assert_eq!(body["total_contacts"], 1);
        assert_eq!(body["total_inquiries"], 1);
        assert_eq!(body["total_users"], 0);
        assert_eq!(body["total_articles"], 0);

        // Empty optional fields were dropped, not stored as "".
        let inquiries = app
            .oneshot(bearer_request(
                Method::GET,
                "/api/admin/investor-inquiries",
                &token,
            ))
            .await
            .unwrap();
        let list = body_json(inquiries).await;
        assert_eq!(list[0]["company"], "Fund LP");
        assert!(list[0].get("investment_range").is_none());
    }

    #[tokio::test]
    async fn chat_requires_auth_and_logs_exchange() {
        let app = test_app().await;

        let anonymous = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/chat",
                json!({ "message": "hello" }),
            ))
            .await
            .unwrap();
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        let body = register_alice(&app).await;
        let token = body["token"].as_str().unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/chat")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({ "message": "hello" })).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let chat = body_json(response).await;
        assert!(chat["response"].as_str().unwrap().contains("hello"));
    }
}
