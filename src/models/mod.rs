//! Domain models

pub mod author;
pub mod book;
pub mod client;

pub use author::Author;
pub use book::{Book, BookDetails, BookGenre, BookSearchQuery};
pub use client::{Client, UserClaims};
