use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use genrescope_core::view::{self, AUTHOR_TABLE_COLUMNS, WORD_TABLE_COLUMNS};
use genrescope_core::{BookId, DataStore, Genre, DEFAULT_MAX_WORD_ROWS};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::sessions::{SessionLimits, SessionRegistry};

const TITLE: &str = "9,089 American Novels, 1880-2000";
const SUBTITLE: &str = "Automatic Genre Classification for the US Novel Corpus";

/// Shared by every worker: the read-only store and the session table.
pub struct AppState {
    pub store: Arc<DataStore>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self::with_limits(store, SessionLimits::default())
    }

    pub fn with_limits(store: Arc<DataStore>, limits: SessionLimits) -> Self {
        Self {
            store,
            sessions: SessionRegistry::with_limits(limits),
        }
    }
}

/// Body of a selection event. A missing or null `value` means the control was cleared.
#[derive(Deserialize)]
struct SelectionRequest<T> {
    value: Option<T>,
}

#[derive(Deserialize)]
struct WordsQuery {
    max_rows: Option<usize>,
}

type ApiResult = Result<HttpResponse, ApiError>;

pub struct RestApi;

impl RestApi {
    /// Bind and serve until the server stops. Fails early if the address
    /// cannot be bound.
    pub async fn start(
        store: Arc<DataStore>,
        host: String,
        port: u16,
        limits: SessionLimits,
    ) -> std::io::Result<()> {
        let state = web::Data::new(AppState::with_limits(store, limits));

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .configure(routes)
        })
        .bind((host.as_str(), port))?
        .run()
        .await
    }
}

/// Register every dashboard route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard))
        .route("/health", web::get().to(health))
        .route("/options/authors", web::get().to(author_options))
        .route("/options/titles", web::get().to(title_options))
        .route("/options/genres", web::get().to(genre_options))
        .route("/projection", web::get().to(projection))
        .route("/authors/{author}/books", web::get().to(author_books))
        .route("/books/{id}/confidence", web::get().to(book_confidence))
        .route("/genres/{genre}/words", web::get().to(genre_words))
        .route("/sessions", web::post().to(create_session))
        .route("/sessions/{id}", web::get().to(get_session))
        .route("/sessions/{id}", web::delete().to(delete_session))
        .route("/sessions/{id}/author", web::put().to(select_author))
        .route("/sessions/{id}/book", web::put().to(select_book))
        .route("/sessions/{id}/genre", web::put().to(select_genre));
}

async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    let genres: Vec<Genre> = Genre::ALL.to_vec();
    HttpResponse::Ok().json(serde_json::json!({
        "title": TITLE,
        "subtitle": SUBTITLE,
        "books": state.store.book_count(),
        "genres": genres,
        "columns": {
            "author_table": AUTHOR_TABLE_COLUMNS,
            "word_table": WORD_TABLE_COLUMNS,
        },
        "sessions": state.sessions.len(),
    }))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn author_options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(view::author_options(&state.store))
}

async fn title_options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(view::title_options(&state.store))
}

async fn genre_options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(view::genre_options(&state.store))
}

async fn projection(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "result": view::scatter_plot(&state.store)
    }))
}

async fn author_books(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let author = path.into_inner();
    HttpResponse::Ok().json(serde_json::json!({
        "result": view::author_books(&state.store, &author)
    }))
}

async fn book_confidence(state: web::Data<AppState>, path: web::Path<u64>) -> ApiResult {
    let chart = view::confidence_chart(&state.store, BookId(path.into_inner()))?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": chart })))
}

async fn genre_words(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<WordsQuery>,
) -> ApiResult {
    let genre = path.into_inner();
    let max_rows = query.max_rows.unwrap_or(DEFAULT_MAX_WORD_ROWS);
    let rows = view::genre_word_table(&state.store, &genre, max_rows)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": rows })))
}

async fn create_session(state: web::Data<AppState>) -> ApiResult {
    let (id, snapshot) = state.sessions.create(&state.store)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": id,
        "result": snapshot,
    })))
}

async fn get_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> ApiResult {
    let snapshot = state.sessions.snapshot(path.into_inner())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": snapshot })))
}

async fn delete_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> ApiResult {
    let id = path.into_inner();
    if state.sessions.remove(id) {
        Ok(HttpResponse::Ok().json(serde_json::json!({ "result": true })))
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

async fn select_author(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SelectionRequest<String>>,
) -> ApiResult {
    let author = req.into_inner().value;
    let rows = state.sessions.update(path.into_inner(), |session| {
        Ok(session.select_author(&state.store, author.as_deref())?.to_vec())
    })?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": rows })))
}

async fn select_book(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SelectionRequest<BookId>>,
) -> ApiResult {
    let book_id = req.into_inner().value;
    let (refresh, chart) = state.sessions.update(path.into_inner(), |session| {
        let refresh = session.select_book(&state.store, book_id)?;
        Ok((refresh, session.confidence_chart().clone()))
    })?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "refresh": refresh,
        "result": chart,
    })))
}

async fn select_genre(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SelectionRequest<String>>,
) -> ApiResult {
    let genre = req.into_inner().value;
    let rows = state.sessions.update(path.into_inner(), |session| {
        Ok(session.select_genre(&state.store, genre.as_deref())?.to_vec())
    })?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "result": rows })))
}
