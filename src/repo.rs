use crate::models::{Book, BookChanges, NewUser, User};
use std::error::Error;
use std::future::Future;

pub trait BookRepo: Clone + Send + Sync + 'static {
    type Error: Error + Send + Sync + 'static;

    fn list_books(&self) -> impl Future<Output = Result<Vec<Book>, Self::Error>> + Send;

    fn get_book(&self, isbn: &str) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send;

    /// Returns None if a book with the same ISBN already exists
    fn insert_book(&self, book: Book) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send;

    fn update_book(
        &self,
        isbn: &str,
        changes: BookChanges,
    ) -> impl Future<Output = Result<Option<Book>, Self::Error>> + Send;

    /// Returns true if the book existed and was deleted, false otherwise
    fn delete_book(&self, isbn: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

pub trait UserRepo: Clone + Send + Sync + 'static {
    type Error: Error + Send + Sync + 'static;

    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send;

    fn get_user(&self, id: i32) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send;

    /// Users whose type is exactly `user_type`. The value is only ever passed
    /// to the store as a bound parameter.
    fn search_users(
        &self,
        user_type: &str,
    ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send;

    fn insert_user(&self, new_user: NewUser) -> impl Future<Output = Result<User, Self::Error>> + Send;

    fn update_user(
        &self,
        id: i32,
        new_user: NewUser,
    ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send;

    /// Returns true if the user existed and was deleted, false otherwise
    fn delete_user(&self, id: i32) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
