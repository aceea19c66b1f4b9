use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use cookie::{Cookie, SameSite};
use tracing::{info, warn};

use crate::{
    AppState,
    auth::{self, SESSION_COOKIE},
    error::AppResult,
    forms::{FormErrors, LoginForm},
    models::NextQuery,
    templates,
    urls,
};

pub async fn login_form(Query(q): Query<NextQuery>) -> Html<String> {
    Html(templates::login_page("", q.next.as_deref(), &FormErrors::default()))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let rerender = |errors: &FormErrors| {
        Html(templates::login_page(form.username.trim(), form.next.as_deref(), errors))
            .into_response()
    };

    if let Err(errors) = form.check() {
        return Ok(rerender(&errors));
    }

    let username = form.username.trim();
    if !state.login_throttle.allow(username) {
        warn!(%username, "login throttled");
        let mut errors = FormErrors::default();
        errors.add_non_field("Too many login attempts. Try again in a minute.");
        return Ok(rerender(&errors));
    }

    let Some(user) = auth::authenticate(&state.db, username, &form.password).await? else {
        warn!(%username, "login failed");
        let mut errors = FormErrors::default();
        errors.add_non_field("Please enter a correct username and password.");
        return Ok(rerender(&errors));
    };

    let ttl = state.config.session_ttl_seconds();
    let token = auth::start_session(&state.db, user.id, ttl).await?;
    info!(username = %user.username, "logged in");

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl));

    let target = urls::safe_next(form.next.as_deref()).to_string();
    Ok((jar.add(cookie), Redirect::to(&target)).into_response())
}

pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        auth::end_session(&state.db, cookie.value()).await?;
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Redirect::to(urls::MOVIE_LIST)).into_response())
}
