use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::Html,
};

use crate::{
    AppState,
    auth::MaybeUser,
    error::{AppResult, OrNotFound},
    models::MovieListQuery,
    templates,
};

pub async fn actor_list(
    State(state): State<Arc<AppState>>,
    MaybeUser(viewer): MaybeUser,
) -> AppResult<Html<String>> {
    let actors = state.catalog.actors_with_movies().await?;
    Ok(Html(templates::actor_list_page(viewer.as_ref(), &actors)))
}

pub async fn actor_detail(
    State(state): State<Arc<AppState>>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let actor = state.catalog.actor(id).await?.or_not_found("actor")?;
    Ok(Html(templates::actor_detail_page(viewer.as_ref(), &actor)))
}

pub async fn movie_list(
    State(state): State<Arc<AppState>>,
    MaybeUser(viewer): MaybeUser,
    Query(q): Query<MovieListQuery>,
) -> AppResult<Html<String>> {
    let movies = state.catalog.movies(q.term()).await?;
    Ok(Html(templates::movie_list_page(viewer.as_ref(), &movies, q.term())))
}

pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let detail = state.catalog.movie_detail(id).await?.or_not_found("movie")?;
    Ok(Html(templates::movie_detail_page(viewer.as_ref(), &detail)))
}
