use serde::{Deserialize, Serialize};

use crate::{
    entities::{actor, movie, review, user, video},
    urls,
};

#[derive(Clone, Debug)]
pub struct ActorWithMovies {
    pub actor: actor::Model,
    pub movies: Vec<movie::Model>,
}

#[derive(Clone, Debug)]
pub struct MovieWithActor {
    pub movie: movie::Model,
    pub actor: Option<actor::Model>,
}

#[derive(Clone, Debug)]
pub struct ReviewWithAuthor {
    pub review: review::Model,
    pub author: Option<user::Model>,
}

impl ReviewWithAuthor {
    pub fn author_name(&self) -> &str {
        self.author.as_ref().map(|a| a.username.as_str()).unwrap_or("")
    }
}

/// Everything the movie detail page shows.
#[derive(Clone, Debug)]
pub struct MovieDetail {
    pub movie: movie::Model,
    pub actor: Option<actor::Model>,
    pub videos: Vec<video::Model>,
    pub reviews: Vec<ReviewWithAuthor>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieListQuery {
    #[serde(default)]
    pub query: Option<String>,
}

impl MovieListQuery {
    /// The search term, if a non-empty one was given.
    pub fn term(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// One element of the review list JSON. Only the author's username is exposed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewItem {
    pub message: String,
    pub edit_url: String,
    pub delete_url: String,
    pub author: ReviewAuthor,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewAuthor {
    pub username: String,
}

impl ReviewItem {
    /// Links are built from the movie id the list was requested for.
    pub fn new(movie_id: i32, entry: ReviewWithAuthor) -> Self {
        let username = entry.author_name().to_string();
        Self {
            edit_url: urls::review_edit(movie_id, entry.review.id),
            delete_url: urls::review_delete(movie_id, entry.review.id),
            message: entry.review.message,
            author: ReviewAuthor { username },
        }
    }
}
