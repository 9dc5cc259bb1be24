use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::{JsonBody, MessageBody};
use crate::error::ApiError;
use crate::models::{Book, BookChanges};
use crate::repo::BookRepo;
use crate::validation::BOOK_SCHEMA;

#[derive(Serialize)]
pub struct BooksBody {
    books: Vec<Book>,
}

#[derive(Serialize)]
pub struct BookBody {
    book: Book,
}

pub fn routes<R: BookRepo>(repo: R) -> Router {
    Router::new()
        .route("/books", get(list_books::<R>).post(insert_book::<R>))
        .route(
            "/books/{isbn}",
            get(get_book::<R>)
                .put(update_book::<R>)
                .delete(delete_book::<R>),
        )
        .with_state(repo)
}

async fn list_books<R: BookRepo>(State(repo): State<R>) -> Result<Json<BooksBody>, ApiError> {
    let books = repo.list_books().await.map_err(ApiError::internal)?;

    info!("Retrieved {} books from the DB", books.len());

    Ok(Json(BooksBody { books }))
}

async fn get_book<R: BookRepo>(
    State(repo): State<R>,
    Path(isbn): Path<String>,
) -> Result<Json<BookBody>, ApiError> {
    let book = repo.get_book(&isbn).await.map_err(ApiError::internal)?;

    match book {
        Some(book) => {
            info!("Retrieved book from DB: {:?}", book);
            Ok(Json(BookBody { book }))
        }
        None => {
            info!("No book found in DB with ISBN: {}", isbn);
            Err(no_such_book(&isbn))
        }
    }
}

async fn insert_book<R: BookRepo>(
    State(repo): State<R>,
    JsonBody(body): JsonBody<Value>,
) -> Result<(StatusCode, Json<BookBody>), ApiError> {
    let new_book: Book = BOOK_SCHEMA.parse(body)?;
    let isbn = new_book.isbn.clone();

    let inserted_book = repo
        .insert_book(new_book)
        .await
        .map_err(ApiError::internal)?;

    match inserted_book {
        Some(book) => {
            info!("Inserted book into the DB: {:?}", book);
            Ok((StatusCode::CREATED, Json(BookBody { book })))
        }
        None => {
            info!("Tried to insert a book with existing ISBN: {}", isbn);
            Err(ApiError::Conflict(format!(
                "A book with ISBN {} already exists",
                isbn
            )))
        }
    }
}

async fn update_book<R: BookRepo>(
    State(repo): State<R>,
    Path(isbn): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<BookBody>, ApiError> {
    // The whole record is required, but the ISBN in the path wins
    let submitted: Book = BOOK_SCHEMA.parse(body)?;

    let updated_book = repo
        .update_book(&isbn, BookChanges::from(submitted))
        .await
        .map_err(ApiError::internal)?;

    match updated_book {
        Some(book) => {
            info!("Updated book in DB: {:?}", book);
            Ok(Json(BookBody { book }))
        }
        None => {
            info!("Tried to update non-existent book with ISBN: {}", isbn);
            Err(no_such_book(&isbn))
        }
    }
}

async fn delete_book<R: BookRepo>(
    State(repo): State<R>,
    Path(isbn): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let deleted = repo.delete_book(&isbn).await.map_err(ApiError::internal)?;

    if deleted {
        info!("Deleted book from DB with ISBN: {}", isbn);
    } else {
        info!("Nothing to delete for ISBN: {}", isbn);
    }

    Ok(Json(MessageBody {
        message: "Book deleted",
    }))
}

fn no_such_book(isbn: &str) -> ApiError {
    ApiError::NotFound(format!("There is no book with an isbn of '{}'", isbn))
}
