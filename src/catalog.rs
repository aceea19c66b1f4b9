use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::{
    entities::{actor, movie, review, user, video},
    error::AppResult,
    models::{ActorWithMovies, MovieDetail, MovieWithActor, ReviewWithAuthor},
};

/// Reads and writes against the movie catalogue.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All actors, each with its movies loaded in one extra query.
    pub async fn actors_with_movies(&self) -> AppResult<Vec<ActorWithMovies>> {
        let actors = actor::Entity::find().order_by_asc(actor::Column::Id).all(&self.db).await?;
        let movies = actors
            .load_many(movie::Entity::find().order_by_asc(movie::Column::Id), &self.db)
            .await?;

        Ok(actors
            .into_iter()
            .zip(movies)
            .map(|(actor, movies)| ActorWithMovies { actor, movies })
            .collect())
    }

    pub async fn actor(&self, id: i32) -> AppResult<Option<ActorWithMovies>> {
        let Some(actor) = actor::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let movies = actor
            .find_related(movie::Entity)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(Some(ActorWithMovies { actor, movies }))
    }

    /// Movies with their lead actor, optionally narrowed to names containing `term`
    /// regardless of case. SQLite's `LIKE` only folds ASCII, so matching happens here.
    pub async fn movies(&self, term: Option<&str>) -> AppResult<Vec<MovieWithActor>> {
        let rows = movie::Entity::find()
            .find_also_related(actor::Entity)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        let needle = term.map(str::to_lowercase);
        Ok(rows
            .into_iter()
            .filter(|(movie, _)| {
                needle.as_deref().is_none_or(|n| name_matches(&movie.name, n))
            })
            .map(|(movie, actor)| MovieWithActor { movie, actor })
            .collect())
    }

    pub async fn movie(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn movie_detail(&self, id: i32) -> AppResult<Option<MovieDetail>> {
        let Some((movie, actor)) = movie::Entity::find_by_id(id)
            .find_also_related(actor::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let videos = movie
            .find_related(video::Entity)
            .order_by_asc(video::Column::Id)
            .all(&self.db)
            .await?;
        let reviews = self.reviews(movie.id).await?;

        Ok(Some(MovieDetail { movie, actor, videos, reviews }))
    }

    /// Reviews posted on a movie, oldest first, with their authors.
    pub async fn reviews(&self, movie_id: i32) -> AppResult<Vec<ReviewWithAuthor>> {
        let rows = review::Entity::find()
            .filter(review::Column::MovieId.eq(movie_id))
            .order_by_asc(review::Column::Id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(review, author)| ReviewWithAuthor { review, author }).collect())
    }

    pub async fn review(&self, id: i32) -> AppResult<Option<review::Model>> {
        Ok(review::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create_review(
        &self,
        mut draft: review::ActiveModel,
        author_id: i32,
        movie_id: i32,
    ) -> AppResult<review::Model> {
        draft.author_id = Set(author_id);
        draft.movie_id = Set(movie_id);
        Ok(draft.insert(&self.db).await?)
    }

    pub async fn update_review(&self, bound: review::ActiveModel) -> AppResult<review::Model> {
        Ok(bound.update(&self.db).await?)
    }

    pub async fn delete_review(&self, review: review::Model) -> AppResult<()> {
        review.delete(&self.db).await?;
        Ok(())
    }
}

/// Case-insensitive substring test; `needle` is already lower-cased.
fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_folds_unicode_case() {
        assert!(name_matches("Amélie", &"AMÉLIE".to_lowercase()));
        assert!(name_matches("ΟΔΥΣΣΕΙΑ", &"οδυ".to_lowercase()));
        assert!(name_matches("The Master", "mast"));
        assert!(name_matches("100% Wolf", "0% w"));
        assert!(!name_matches("Joker", "her"));
    }
}
