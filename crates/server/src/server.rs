use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::post,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{budget, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<user::Model> = user::Entity::find()
        .filter(user::Column::Username.eq(auth_header.username()))
        .filter(user::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = if let Some(user) = user {
        user
    } else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/budget", post(budget::create).get(budget::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};
    use base64::Engine as _;
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::{ConnectionTrait, Database, Statement};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        let backend = db.get_database_backend();
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec!["alice".into(), "password".into()],
        ))
        .await
        .unwrap();

        let engine = Engine::builder().database(db.clone()).build();
        router(ServerState {
            engine: Arc::new(engine),
            db,
        })
    }

    fn basic_auth(username: &str, password: &str) -> String {
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
        format!("Basic {encoded}")
    }

    fn post_budget(body: &serde_json::Value, auth: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/budget")
            .header(header::AUTHORIZATION, auth)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_budget_returns_tip_and_snapshot() {
        let app = test_router().await;

        let body = serde_json::json!({
            "income": 3000.0,
            "expenses": [
                { "category": "Food", "amount": 400.0 },
                { "category": "Transport", "amount": 200.0 },
                { "category": "Subscriptions", "amount": 50.0 }
            ]
        });
        let response = app
            .oneshot(post_budget(&body, &basic_auth("alice", "password")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(
            json["tip"].as_str().unwrap(),
            "Try home cooking or meal prep to cut down food expenses!"
        );
        assert_eq!(json["budget"]["total_expenses"].as_f64().unwrap(), 650.0);
        assert_eq!(json["budget"]["original_balance"].as_f64().unwrap(), 2350.0);
        assert_eq!(json["budget"]["shadow_balance"].as_f64().unwrap(), 2555.0);
        assert_eq!(
            json["budget"]["shadow_expenses"][0]["amount"]
                .as_i64()
                .unwrap(),
            300
        );
    }

    #[tokio::test]
    async fn empty_expense_list_maps_to_422() {
        let app = test_router().await;

        let body = serde_json::json!({ "income": 1000.0, "expenses": [] });
        let response = app
            .oneshot(post_budget(&body, &basic_auth("alice", "password")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("expense"));
    }

    #[tokio::test]
    async fn unknown_credentials_map_to_401() {
        let app = test_router().await;

        let body = serde_json::json!({
            "income": 1000.0,
            "expenses": [{ "category": "Food", "amount": 10.0 }]
        });
        let response = app
            .oneshot(post_budget(&body, &basic_auth("alice", "wrong")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_returns_stored_snapshots() {
        let app = test_router().await;

        let body = serde_json::json!({
            "income": 1000.0,
            "expenses": [{ "category": "Rent", "amount": 500.0 }]
        });
        let response = app
            .clone()
            .oneshot(post_budget(&body, &basic_auth("alice", "password")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/budget")
                    .header(header::AUTHORIZATION, basic_auth("alice", "password"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let budgets = json["budgets"].as_array().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0]["expenses"][0]["category"], "Rent");
        assert_eq!(budgets[0]["shadow_balance"].as_f64().unwrap(), 500.0);
    }
}
