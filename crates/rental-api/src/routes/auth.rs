//! 인증 API 라우트
//!
//! # 엔드포인트
//!
//! - `POST /register` - 회원가입 후 토큰 발급
//! - `POST /login` - 로그인 후 토큰 발급
//! - `GET /protected` - Bearer 토큰이 필요한 확인용 라우트

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use rental_core::{LoginCredentials, NewUser};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{AuthError, AuthUser, TokenResponse};
use crate::state::AppState;

/// 보호 라우트 응답
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponse {
    pub message: String,
    pub user_id: Uuid,
}

/// POST /register
async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(input) = body?;
    state.auth.register(input).await.map(Json)
}

/// POST /login
async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(credentials) = body?;
    state.auth.login(credentials).await.map(Json)
}

/// GET /protected
async fn protected(auth: AuthUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Protected route accessed".to_string(),
        user_id: auth.user_id,
    })
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/protected", get(protected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, TokenIssuer};
    use crate::error::ErrorResponse;
    use crate::state::{create_test_state, TEST_JWT_SECRET};
    use axum::{
        body::Body,
        http::{
            header::{AUTHORIZATION, CONTENT_TYPE},
            Request, StatusCode,
        },
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        auth_router().with_state(Arc::new(create_test_state()))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn protected_request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn registration(email: &str, password: &str) -> Value {
        json!({
            "fullName": "Rahim Uddin",
            "role": "renter",
            "phoneNumber": "01712345678",
            "email": email,
            "password": password
        })
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn register_token(app: &Router, email: &str) -> String {
        let response = app
            .clone()
            .oneshot(post_json("/register", &registration(email, "pw1")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json::<TokenResponse>(response).await.token
    }

    #[tokio::test]
    async fn test_register_login_and_access() {
        let state = Arc::new(create_test_state());
        let app = auth_router().with_state(state.clone());
        let t1 = register_token(&app, "a@x.com").await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/login",
                &json!({ "email": "a@x.com", "password": "pw1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let t2 = body_json::<TokenResponse>(response).await.token;

        let mut subjects = Vec::new();
        for token in [&t1, &t2] {
            let response = app
                .clone()
                .oneshot(protected_request(Some(&format!("Bearer {}", token))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let body: ProtectedResponse = body_json(response).await;
            assert_eq!(body.message, "Protected route accessed");
            subjects.push(body.user_id);
        }
        assert_eq!(subjects[0], subjects[1]);

        let stored = state
            .auth
            .users()
            .find_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subjects[0], stored.id);

        let response = app
            .oneshot(post_json(
                "/login",
                &json!({ "email": "a@x.com", "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let app = app();
        register_token(&app, "a@x.com").await;

        let response = app
            .oneshot(post_json("/register", &registration("A@x.com", "pw2")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "User already exists");
    }

    #[tokio::test]
    async fn test_padded_email_registers_and_logs_in() {
        let app = app();
        register_token(&app, " C@X.com ").await;

        let response = app
            .clone()
            .oneshot(post_json("/register", &registration("c@x.com", "pw2")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post_json(
                "/login",
                &json!({ "email": "c@x.COM", "password": "pw1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let response = app()
            .oneshot(post_json("/register", &json!({ "email": "a@x.com" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut body = registration("a@x.com", "pw1");
        body["fullName"] = json!("   ");
        let response = app().oneshot(post_json("/register", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = body_json(response).await;
        assert!(error.error.contains("값이 비어 있습니다"));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let response = app()
            .oneshot(post_json(
                "/login",
                &json!({ "email": "nobody@x.com", "password": "pw1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_guard_without_header() {
        let response = app().oneshot(protected_request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Unauthorized");
    }

    #[tokio::test]
    async fn test_guard_rejects_bad_tokens() {
        let app = app();
        let token = register_token(&app, "a@x.com").await;

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let expired = {
            let issuer = TokenIssuer::new(TEST_JWT_SECRET, None);
            let mut claims = Claims::new(Uuid::new_v4(), None);
            claims.exp = Some(chrono::Utc::now().timestamp() - 3600);
            issuer.encode(&claims).unwrap()
        };

        let cases = [
            format!("Bearer {}", tampered),
            format!("Bearer {}", expired),
            format!("Token {}", token),
            "Bearer not-a-jwt".to_string(),
        ];

        for header in cases {
            let response = app
                .clone()
                .oneshot(protected_request(Some(&header)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "header: {}", header);
            let error: ErrorResponse = body_json(response).await;
            assert_eq!(error.error, "Forbidden");
        }
    }
}
