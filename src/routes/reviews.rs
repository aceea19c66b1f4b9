use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::{
    AppState,
    auth::CurrentUser,
    error::{AppResult, OrNotFound},
    forms::{FormErrors, ReviewForm, ReviewSubmission},
    models::ReviewItem,
    templates,
    urls,
};

// TODO: restrict edit and delete to the review's author. Reviews are looked up
// by id alone, so any logged-in user may change any review.

pub async fn review_list(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<Vec<ReviewItem>>> {
    let reviews = state.catalog.reviews(movie_id).await?;
    Ok(Json(reviews.into_iter().map(|entry| ReviewItem::new(movie_id, entry)).collect()))
}

pub async fn new_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(movie_id): Path<i32>,
) -> AppResult<Html<String>> {
    let movie = state.catalog.movie(movie_id).await?.or_not_found("movie")?;
    Ok(Html(templates::review_form_page(
        Some(&user),
        &movie,
        &ReviewForm::default(),
        &FormErrors::default(),
    )))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(movie_id): Path<i32>,
    ReviewSubmission(form): ReviewSubmission,
) -> AppResult<Response> {
    let movie = state.catalog.movie(movie_id).await?.or_not_found("movie")?;

    match form.clone().bind(None) {
        Ok(draft) => {
            let review = state.catalog.create_review(draft, user.id, movie.id).await?;
            info!(
                review_id = review.id,
                movie_id = movie.id,
                author = %user.username,
                "review created"
            );
            Ok(Redirect::to(&movie.canonical_url()).into_response())
        },
        Err(errors) => {
            Ok(Html(templates::review_form_page(Some(&user), &movie, &form, &errors))
                .into_response())
        },
    }
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((_movie_id, id)): Path<(i32, i32)>,
) -> AppResult<Html<String>> {
    let review = state.catalog.review(id).await?.or_not_found("review")?;
    let movie = state.catalog.movie(review.movie_id).await?.or_not_found("movie")?;
    Ok(Html(templates::review_form_page(
        Some(&user),
        &movie,
        &ReviewForm::from_review(&review),
        &FormErrors::default(),
    )))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((_movie_id, id)): Path<(i32, i32)>,
    ReviewSubmission(form): ReviewSubmission,
) -> AppResult<Response> {
    let review = state.catalog.review(id).await?.or_not_found("review")?;
    let movie = state.catalog.movie(review.movie_id).await?.or_not_found("movie")?;

    match form.clone().bind(Some(review)) {
        Ok(bound) => {
            let review = state.catalog.update_review(bound).await?;
            info!(
                review_id = review.id,
                movie_id = movie.id,
                editor = %user.username,
                "review updated"
            );
            Ok(Redirect::to(&movie.canonical_url()).into_response())
        },
        Err(errors) => {
            Ok(Html(templates::review_form_page(Some(&user), &movie, &form, &errors))
                .into_response())
        },
    }
}

/// Only renders the confirmation form; deleting takes the POST below.
pub async fn confirm_delete(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((_movie_id, id)): Path<(i32, i32)>,
) -> AppResult<Html<String>> {
    let review = state.catalog.review(id).await?.or_not_found("review")?;
    Ok(Html(templates::review_confirm_delete_page(Some(&user), &review)))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((_movie_id, id)): Path<(i32, i32)>,
) -> AppResult<Redirect> {
    let review = state.catalog.review(id).await?.or_not_found("review")?;
    let target = urls::movie_detail(review.movie_id);
    let review_id = review.id;
    state.catalog.delete_review(review).await?;
    info!(review_id, deleted_by = %user.username, "review deleted");
    Ok(Redirect::to(&target))
}
