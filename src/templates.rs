use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{actor, movie, review, user},
    forms::{FormErrors, ReviewForm},
    models::{ActorWithMovies, MovieDetail, MovieWithActor, ReviewWithAuthor},
    urls,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn actor_list_page(viewer: Option<&user::Model>, actors: &[ActorWithMovies]) -> String {
    page(
        "Actors",
        viewer,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Actors" }
            @if actors.is_empty() {
                p class="mt-6 text-gray-600" { "No actors yet." }
            } @else {
                ul class="mt-6 space-y-4" {
                    @for entry in actors {
                        li class="bg-white shadow rounded-lg p-6 flex gap-6" {
                            (photo(&entry.actor))
                            div {
                                a class="text-xl font-semibold text-blue-700 hover:text-blue-900" href=(urls::actor_detail(entry.actor.id)) {
                                    (entry.actor.name)
                                }
                                (movie_links(&entry.movies))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn actor_detail_page(viewer: Option<&user::Model>, entry: &ActorWithMovies) -> String {
    page(
        &entry.actor.name,
        viewer,
        html! {
            div class="bg-white shadow rounded-lg p-8 flex gap-8" {
                (photo(&entry.actor))
                div {
                    h1 class="text-3xl font-bold text-gray-900" { (entry.actor.name) }
                    h2 class="mt-6 text-sm font-semibold text-gray-700" { "Movies" }
                    (movie_links(&entry.movies))
                }
            }
            a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href=(urls::ACTOR_LIST) { "All actors" }
        },
    )
}

pub fn movie_list_page(
    viewer: Option<&user::Model>,
    movies: &[MovieWithActor],
    query: Option<&str>,
) -> String {
    page(
        "Movies",
        viewer,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Movies" }
            form class="mt-6 flex gap-2" method="get" action=(urls::MOVIE_LIST) {
                input class="flex-1 rounded-md border border-gray-300 px-3 py-2" type="search" name="query" value=(query.unwrap_or("")) placeholder="Search by title";
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
            }
            @if movies.is_empty() {
                p class="mt-6 text-gray-600" { "No movies found." }
            } @else {
                ul class="mt-6 grid gap-4 md:grid-cols-2" {
                    @for entry in movies {
                        li class="bg-white shadow rounded-lg p-6" {
                            a class="text-xl font-semibold text-blue-700 hover:text-blue-900" href=(entry.movie.canonical_url()) {
                                (entry.movie.name)
                            }
                            @if let Some(actor) = &entry.actor {
                                p class="mt-1 text-sm text-gray-500" {
                                    "Starring "
                                    a class="hover:text-gray-700" href=(urls::actor_detail(actor.id)) { (actor.name) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn movie_detail_page(viewer: Option<&user::Model>, detail: &MovieDetail) -> String {
    let movie = &detail.movie;
    page(
        &movie.name,
        viewer,
        html! {
            div class="bg-white shadow rounded-lg p-8 flex gap-8" {
                img class="w-48 rounded" src=(urls::media(&movie.poster)) alt=(movie.name);
                div {
                    h1 class="text-3xl font-bold text-gray-900" { (movie.name) }
                    @if let Some(actor) = &detail.actor {
                        p class="mt-2 text-gray-600" {
                            "Starring "
                            a class="text-blue-600 hover:text-blue-800" href=(urls::actor_detail(actor.id)) { (actor.name) }
                        }
                    }
                    p class="mt-4 whitespace-pre-line text-gray-700" { (movie.description) }
                }
            }

            @if !detail.videos.is_empty() {
                section class="mt-8 space-y-6" {
                    h2 class="text-xl font-semibold text-gray-900" { "Videos" }
                    @for video in &detail.videos {
                        div {
                            h3 class="text-sm font-medium text-gray-700" { (video.title) }
                            @if let Some(embed) = video.youtube_embed_url() {
                                iframe class="mt-2 aspect-video w-full" src=(embed) title=(video.title) allowfullscreen {}
                            } @else {
                                a class="mt-2 block text-blue-600" href=(video.youtube_url) { (video.youtube_url) }
                            }
                        }
                    }
                }
            }

            section class="mt-8" {
                div class="flex items-center justify-between" {
                    h2 class="text-xl font-semibold text-gray-900" { "Reviews" }
                    a class="text-sm text-blue-600 hover:text-blue-800" href=(urls::review_new(movie.id)) { "Write a review" }
                }
                (review_entries(movie.id, &detail.reviews))
            }
        },
    )
}

pub fn review_form_page(
    viewer: Option<&user::Model>,
    movie: &movie::Model,
    form: &ReviewForm,
    errors: &FormErrors,
) -> String {
    page(
        "Review",
        viewer,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Review of " (movie.name) }
                form class="mt-6 space-y-4" method="post" {
                    div {
                        label class="block text-sm font-medium text-gray-700" for="message" { "Message" }
                        textarea class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="message" id="message" rows="6" { (form.message) }
                        (field_errors(errors.field("message")))
                    }
                    div class="flex gap-4 items-center" {
                        button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save" }
                        a class="text-gray-600 hover:text-gray-800" href=(movie.canonical_url()) { "Cancel" }
                    }
                }
            }
        },
    )
}

pub fn review_confirm_delete_page(viewer: Option<&user::Model>, review: &review::Model) -> String {
    page(
        "Delete review",
        viewer,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Delete this review?" }
                blockquote class="mt-4 border-l-4 border-gray-300 pl-4 text-gray-700" { (review.message) }
                form class="mt-6 flex gap-4 items-center" method="post" {
                    button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" { "Delete" }
                    a class="text-gray-600 hover:text-gray-800" href=(urls::movie_detail(review.movie_id)) { "Cancel" }
                }
            }
        },
    )
}

pub fn login_page(username: &str, next: Option<&str>, errors: &FormErrors) -> String {
    page(
        "Log in",
        None,
        html! {
            div class="max-w-md mx-auto bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Log in" }
                (field_errors(errors.non_field()))
                form class="mt-6 space-y-4" method="post" action=(urls::LOGIN) {
                    @if let Some(next) = next {
                        input type="hidden" name="next" value=(next);
                    }
                    div {
                        label class="block text-sm font-medium text-gray-700" for="username" { "Username" }
                        input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="username" id="username" value=(username) required;
                        (field_errors(errors.field("username")))
                    }
                    div {
                        label class="block text-sm font-medium text-gray-700" for="password" { "Password" }
                        input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" type="password" name="password" id="password" required;
                        (field_errors(errors.field("password")))
                    }
                    button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Log in" }
                }
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    page(
        "Error",
        None,
        html! {
            div class="max-w-xl mx-auto bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href=(urls::MOVIE_LIST) { "Back to movies" }
            }
        },
    )
}

fn page(title: &str, viewer: Option<&user::Model>, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Movist" }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                nav class="bg-white shadow" {
                    div class="max-w-4xl mx-auto px-6 py-4 flex items-center gap-6" {
                        a class="font-bold text-gray-900" href=(urls::MOVIE_LIST) { "Movist" }
                        a class="text-gray-600 hover:text-gray-900" href=(urls::ACTOR_LIST) { "Actors" }
                        a class="text-gray-600 hover:text-gray-900" href=(urls::MOVIE_LIST) { "Movies" }
                        div class="ml-auto flex items-center gap-4" {
                            @if let Some(user) = viewer {
                                span class="text-sm text-gray-600" { (user.username) }
                                form method="post" action=(urls::LOGOUT) {
                                    button class="text-sm text-blue-600 hover:text-blue-800" type="submit" { "Log out" }
                                }
                            } @else {
                                a class="text-sm text-blue-600 hover:text-blue-800" href=(urls::LOGIN) { "Log in" }
                            }
                        }
                    }
                }
                main class="max-w-4xl mx-auto px-6 py-10" { (body) }
            }
        }
    }
    .into_string()
}

fn photo(actor: &actor::Model) -> Markup {
    html! {
        img class="w-24 h-24 rounded-full object-cover" src=(urls::media(&actor.photo)) alt=(actor.name);
    }
}

fn movie_links(movies: &[movie::Model]) -> Markup {
    html! {
        @if movies.is_empty() {
            p class="mt-2 text-sm text-gray-500" { "—" }
        } @else {
            ul class="mt-2 space-y-1" {
                @for movie in movies {
                    li { a class="text-sm text-blue-600 hover:text-blue-800" href=(movie.canonical_url()) { (movie.name) } }
                }
            }
        }
    }
}

fn review_entries(movie_id: i32, reviews: &[ReviewWithAuthor]) -> Markup {
    html! {
        @if reviews.is_empty() {
            p class="mt-4 text-gray-500" { "No reviews yet." }
        } @else {
            ul class="mt-4 space-y-3" {
                @for entry in reviews {
                    li class="bg-white shadow rounded-lg p-4" {
                        p class="whitespace-pre-line text-gray-800" { (entry.review.message) }
                        div class="mt-2 flex gap-4 text-sm text-gray-500" {
                            span { (entry.author_name()) }
                            a class="hover:text-gray-700" href=(urls::review_edit(movie_id, entry.review.id)) { "Edit" }
                            a class="hover:text-gray-700" href=(urls::review_delete(movie_id, entry.review.id)) { "Delete" }
                        }
                    }
                }
            }
        }
    }
}

fn field_errors(messages: &[String]) -> Markup {
    html! {
        @if !messages.is_empty() {
            ul class="mt-2 text-sm text-red-600" {
                @for message in messages {
                    li { (message) }
                }
            }
        }
    }
}
