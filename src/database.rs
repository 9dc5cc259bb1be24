use crate::models::{Book, BookChanges, NewUser, User};
use crate::repo::{BookRepo, UserRepo};
use crate::schema::{books, users};
use bb8::Pool;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::{
    pooled_connection::{AsyncDieselConnectionManager, PoolError},
    AsyncPgConnection, RunQueryDsl,
};

pub type DBPool = bb8::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

pub async fn create_db_pool(
    connection_string: &str,
    max_connections: u32,
) -> Result<DBPool, PoolError> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(connection_string);
    Pool::builder()
        .max_size(max_connections)
        .build(config)
        .await
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("problem getting a connection from the connection pool: {0}")]
    PoolError(#[from] bb8::RunError<PoolError>),
    #[error("problem executing a statement against the DB: {0}")]
    ResultError(#[from] diesel::result::Error),
}

#[derive(Clone)]
pub struct DatabaseBookRepo {
    pool: DBPool,
}

impl DatabaseBookRepo {
    pub fn new(pool: DBPool) -> Self {
        DatabaseBookRepo { pool }
    }
}

impl BookRepo for DatabaseBookRepo {
    type Error = DatabaseError;

    async fn list_books(&self) -> Result<Vec<Book>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let books = books::table
            .select(Book::as_select())
            .order((books::title, books::isbn))
            .load(&mut conn)
            .await?;

        Ok(books)
    }

    async fn get_book(&self, isbn: &str) -> Result<Option<Book>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let maybe_book = books::table
            .find(isbn)
            .select(Book::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(maybe_book)
    }

    async fn insert_book(&self, book: Book) -> Result<Option<Book>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        // A conflicting ISBN inserts nothing, so RETURNING yields no row
        let inserted_book = diesel::insert_into(books::table)
            .values(book)
            .on_conflict_do_nothing()
            .returning(Book::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;

        Ok(inserted_book)
    }

    async fn update_book(
        &self,
        isbn: &str,
        changes: BookChanges,
    ) -> Result<Option<Book>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let updated_book = diesel::update(books::table.find(isbn))
            .set(changes)
            .returning(Book::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;

        Ok(updated_book)
    }

    async fn delete_book(&self, isbn: &str) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(books::table.find(isbn))
            .execute(&mut conn)
            .await
            .map(|affected_rows| affected_rows > 0)?;

        Ok(deleted)
    }
}

#[derive(Clone)]
pub struct DatabaseUserRepo {
    pool: DBPool,
}

impl DatabaseUserRepo {
    pub fn new(pool: DBPool) -> Self {
        DatabaseUserRepo { pool }
    }
}

impl UserRepo for DatabaseUserRepo {
    type Error = DatabaseError;

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let users = users::table
            .select(User::as_select())
            .order(users::id)
            .load(&mut conn)
            .await?;

        Ok(users)
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let maybe_user = users::table
            .find(id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(maybe_user)
    }

    async fn search_users(&self, user_type: &str) -> Result<Vec<User>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let users = users::table
            .filter(users::user_type.eq(user_type))
            .select(User::as_select())
            .order(users::id)
            .load(&mut conn)
            .await?;

        Ok(users)
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let inserted_user = diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(inserted_user)
    }

    async fn update_user(&self, id: i32, new_user: NewUser) -> Result<Option<User>, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let updated_user = diesel::update(users::table.find(id))
            .set(new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?;

        Ok(updated_user)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map(|affected_rows| affected_rows > 0)?;

        Ok(deleted)
    }
}
