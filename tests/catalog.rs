mod common;

use axum::http::StatusCode;
use common::{body_string, location, spawn_app};
use movist::{catalog::Catalog, entities::{movie, review, video}};
use sea_orm::{EntityTrait, ModelTrait, PaginatorTrait};

#[tokio::test]
async fn actor_list_groups_movies_under_their_actor() {
    let app = spawn_app().await;
    let song = app.actor("송강호").await;
    let bae = app.actor("배두나").await;
    let host = app.movie(song.id, "The Host").await;
    let parasite = app.movie(song.id, "Parasite").await;
    let doona = app.movie(bae.id, "Air Doll").await;

    let actors = Catalog::new(app.db.clone()).actors_with_movies().await.unwrap();
    assert_eq!(actors.len(), 2);
    assert_eq!(actors[0].actor.id, song.id);
    assert_eq!(
        actors[0].movies.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![host.id, parasite.id]
    );
    assert_eq!(actors[1].actor.id, bae.id);
    assert_eq!(actors[1].movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![doona.id]);

    let resp = app.get("/actors/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("송강호"));
    assert!(html.contains("배두나"));
    assert!(html.contains(&format!("href=\"/movies/{}/\"", parasite.id)));
}

#[tokio::test]
async fn actor_detail_renders_or_404s() {
    let app = spawn_app().await;
    let actor = app.actor("Tilda").await;
    app.movie(actor.id, "Okja").await;

    let resp = app.get(&format!("/actors/{}/", actor.id), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("Tilda"));
    assert!(html.contains("Okja"));

    let resp = app.get("/actors/999/", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn movie_list_filters_by_case_insensitive_substring() {
    let app = spawn_app().await;
    let actor = app.actor("Joaquin").await;
    let her = app.movie(actor.id, "Her").await;
    let master = app.movie(actor.id, "The Master").await;
    let joker = app.movie(actor.id, "Joker").await;

    let catalog = Catalog::new(app.db.clone());
    let ids = |rows: Vec<movist::models::MovieWithActor>| {
        rows.into_iter().map(|r| r.movie.id).collect::<Vec<_>>()
    };

    assert_eq!(ids(catalog.movies(Some("HER")).await.unwrap()), vec![her.id]);
    assert_eq!(ids(catalog.movies(Some("e")).await.unwrap()), vec![her.id, master.id, joker.id]);
    assert_eq!(ids(catalog.movies(Some("mast")).await.unwrap()), vec![master.id]);
    assert!(catalog.movies(Some("%")).await.unwrap().is_empty());
    assert_eq!(catalog.movies(None).await.unwrap().len(), 3);

    let rows = catalog.movies(None).await.unwrap();
    assert!(rows.iter().all(|r| r.actor.as_ref().map(|a| a.id) == Some(actor.id)));

    let resp = app.get("/movies/?query=jOkEr", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("Joker"));
    assert!(!html.contains("The Master"));

    let html = body_string(app.get("/movies/?query=", None).await).await;
    assert!(html.contains("The Master"));
}

#[tokio::test]
async fn movie_detail_embeds_videos() {
    let app = spawn_app().await;
    let actor = app.actor("Choi").await;
    let movie = app.movie(actor.id, "Oldboy").await;
    app.video(movie.id, "https://www.youtube.com/watch?v=xyfozmk1SxQ").await;

    let resp = app.get(&movie.canonical_url(), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("Oldboy"));
    assert!(html.contains("https://www.youtube.com/embed/xyfozmk1SxQ"));
    assert!(html.contains(&format!("/movies/{}/reviews/new/", movie.id)));

    let resp = app.get("/movies/12345/", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn root_redirects_to_movies() {
    let app = spawn_app().await;
    let resp = app.get("/", None).await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/movies/");
}

#[tokio::test]
async fn deleting_an_actor_cascades_to_dependents() {
    let app = spawn_app().await;
    let actor = app.actor("Kim").await;
    let movie = app.movie(actor.id, "Burning").await;
    app.video(movie.id, "https://www.youtube.com/watch?v=abc").await;
    let user = app.user("reviewer").await;
    app.review(user.id, movie.id, "slow burn").await;

    actor.delete(&app.db).await.unwrap();

    assert_eq!(movie::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(video::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 0);
}

#[tokio::test]
async fn movie_search_folds_non_ascii_case() {
    let app = spawn_app().await;
    let actor = app.actor("Audrey").await;
    let amelie = app.movie(actor.id, "Amélie").await;
    app.movie(actor.id, "Delicatessen").await;

    let catalog = Catalog::new(app.db.clone());
    let found = catalog.movies(Some("AMÉLIE")).await.unwrap();
    assert_eq!(found.iter().map(|r| r.movie.id).collect::<Vec<_>>(), vec![amelie.id]);

    let html = body_string(app.get("/movies/?query=%C3%89LIE", None).await).await;
    assert!(html.contains("Amélie"));
    assert!(!html.contains("Delicatessen"));
}
