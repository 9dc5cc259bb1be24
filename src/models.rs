use crate::schema::{books, users};

/// A book as stored in the `books` table. Field order here is the field order
/// of every JSON body the API returns.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    diesel::Queryable,
    diesel::Selectable,
    diesel::Insertable,
)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Everything about a book except its ISBN, which never changes
#[derive(Debug, Clone, diesel::AsChangeset)]
#[diesel(table_name = books)]
pub struct BookChanges {
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

impl BookChanges {
    pub fn apply_to(self, isbn: String) -> Book {
        Book {
            isbn,
            amazon_url: self.amazon_url,
            author: self.author,
            language: self.language,
            pages: self.pages,
            publisher: self.publisher,
            title: self.title,
            year: self.year,
        }
    }
}

impl From<Book> for BookChanges {
    fn from(book: Book) -> Self {
        BookChanges {
            amazon_url: book.amazon_url,
            author: book.author,
            language: book.language,
            pages: book.pages,
            publisher: book.publisher,
            title: book.title,
            year: book.year,
        }
    }
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    diesel::Queryable,
    diesel::Selectable,
)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub user_type: String,
}

#[derive(Debug, Clone, serde::Deserialize, diesel::Insertable, diesel::AsChangeset)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    #[serde(rename = "type")]
    pub user_type: String,
}

impl NewUser {
    pub fn with_id(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            user_type: self.user_type,
        }
    }
}
