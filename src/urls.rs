//! Locators for every page the app links to or redirects at.

pub const ACTOR_LIST: &str = "/actors/";
pub const MOVIE_LIST: &str = "/movies/";
pub const LOGIN: &str = "/accounts/login/";
pub const LOGOUT: &str = "/accounts/logout/";

pub fn actor_detail(actor_id: i32) -> String {
    format!("/actors/{actor_id}/")
}

pub fn movie_detail(movie_id: i32) -> String {
    format!("/movies/{movie_id}/")
}

pub fn review_list(movie_id: i32) -> String {
    format!("/movies/{movie_id}/reviews/")
}

pub fn review_new(movie_id: i32) -> String {
    format!("/movies/{movie_id}/reviews/new/")
}

pub fn review_edit(movie_id: i32, review_id: i32) -> String {
    format!("/movies/{movie_id}/reviews/{review_id}/edit/")
}

pub fn review_delete(movie_id: i32, review_id: i32) -> String {
    format!("/movies/{movie_id}/reviews/{review_id}/delete/")
}

/// Login page that returns to `next` afterwards.
pub fn login_with_next(next: &str) -> String {
    format!("{LOGIN}?next={}", urlencoding::encode(next))
}

pub fn media(path: &str) -> String {
    format!("/media/{}", path.trim_start_matches('/'))
}

/// Only local absolute paths are accepted as a post-login destination.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") && !n.contains('\\') => n,
        _ => MOVIE_LIST,
    }
}
