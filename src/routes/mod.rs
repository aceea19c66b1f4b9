mod accounts;
mod catalog;
mod reviews;

use std::sync::Arc;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{AppState, urls};

pub fn router(state: Arc<AppState>) -> Router {
    let media = ServeDir::new(&state.config.media_root);

    Router::new()
        .route("/", get(|| async { Redirect::to(urls::MOVIE_LIST) }))
        .route("/actors/", get(catalog::actor_list))
        .route("/actors/{id}/", get(catalog::actor_detail))
        .route("/movies/", get(catalog::movie_list))
        .route("/movies/{id}/", get(catalog::movie_detail))
        .route("/movies/{movie_id}/reviews/", get(reviews::review_list))
        .route(
            "/movies/{movie_id}/reviews/new/",
            get(reviews::new_form).post(reviews::create),
        )
        .route(
            "/movies/{movie_id}/reviews/{id}/edit/",
            get(reviews::edit_form).post(reviews::update),
        )
        .route(
            "/movies/{movie_id}/reviews/{id}/delete/",
            get(reviews::confirm_delete).post(reviews::delete),
        )
        .route(urls::LOGIN, get(accounts::login_form).post(accounts::login))
        .route(urls::LOGOUT, post(accounts::logout))
        .nest_service("/media", media)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
