#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use movist::{
    AppState,
    auth,
    config::Config,
    entities::{actor, movie, review, user, video},
};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub async fn spawn_app() -> TestApp {
    let mut opts = movist::db::connect_options("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect");
    movist::db::migrate(&db).await.expect("migrate");

    let config = Arc::new(Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        media_root: std::env::temp_dir(),
        session_ttl_days: 1,
        login_attempts_per_minute: 5,
        admin: None,
    });

    let state = Arc::new(AppState::new(config, db.clone()));
    TestApp { router: movist::router(state), db }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.expect("request")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.send(req.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.send(req.body(Body::from(body.to_string())).unwrap()).await
    }

    /// Posts `text_fields` plus one file part named `file_field` as multipart/form-data.
    pub async fn post_multipart(
        &self,
        uri: &str,
        text_fields: &[(&str, &str)],
        file_field: &str,
        cookie: Option<&str>,
    ) -> Response<Body> {
        const BOUNDARY: &str = "movist-test-boundary";
        let mut body = String::new();
        for (name, value) in text_fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{file_field}\"; filename=\"still.png\"\r\nContent-Type: image/png\r\n\r\nnot-really-a-png\r\n"
        ));
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"));
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.send(req.body(Body::from(body)).unwrap()).await
    }

    pub async fn actor(&self, name: &str) -> actor::Model {
        actor::ActiveModel {
            name: Set(name.to_string()),
            photo: Set(format!("actors/{name}.jpg")),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
    }

    pub async fn movie(&self, actor_id: i32, name: &str) -> movie::Model {
        movie::ActiveModel {
            actor_id: Set(actor_id),
            name: Set(name.to_string()),
            poster: Set(format!("posters/{name}.jpg")),
            description: Set(format!("About {name}")),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
    }

    pub async fn video(&self, movie_id: i32, url: &str) -> video::Model {
        video::ActiveModel {
            movie_id: Set(movie_id),
            title: Set("Trailer".to_string()),
            youtube_url: Set(url.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
    }

    pub async fn user(&self, username: &str) -> user::Model {
        auth::create_user(&self.db, username, &format!("{username}@example.com"), "password123")
            .await
            .unwrap()
    }

    pub async fn review(&self, author_id: i32, movie_id: i32, message: &str) -> review::Model {
        review::ActiveModel {
            author_id: Set(author_id),
            movie_id: Set(movie_id),
            message: Set(message.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .unwrap()
    }

    /// Cookie header value for a fresh session of `user_id`.
    pub async fn session_cookie(&self, user_id: i32) -> String {
        let token = auth::start_session(&self.db, user_id, 3600).await.unwrap();
        format!("{}={token}", auth::SESSION_COOKIE)
    }
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()).unwrap_or("")
}
