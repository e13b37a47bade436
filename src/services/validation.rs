//! Domain validation rules for books and authors.
//!
//! Every rule is a stateless function over the candidate plus the current
//! persisted answer fetched by the calling service; nothing is cached
//! between calls. The first violated rule wins, rules are never aggregated.
//!
//! The uniqueness checks are check-then-act and can race under concurrent
//! requests; the database UNIQUE constraints are the backstop (see the
//! unique-violation mapping in the error module).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{author::Author, book::Book},
};

/// Books published in this year or later must carry a price
pub const PRICE_REQUIRED_FROM_YEAR: i32 = 2020;

/// ISBN must be unique among all books, excluding the candidate's own prior
/// state during update. `candidate_id` is None for a new book.
pub fn check_unique_isbn(candidate_id: Option<Uuid>, existing: Option<&Book>) -> AppResult<()> {
    match existing {
        Some(found) if candidate_id != Some(found.id) => Err(AppError::Duplicate(format!(
            "A book with ISBN {} is already registered",
            found.isbn
        ))),
        _ => Ok(()),
    }
}

/// Price is mandatory for books published from the cutoff year onward
pub fn check_required_price(
    publication_date: NaiveDate,
    price: Option<&Decimal>,
) -> AppResult<()> {
    if price.is_none() && publication_date.year() >= PRICE_REQUIRED_FROM_YEAR {
        return Err(AppError::invalid_field(
            "price",
            &format!(
                "Price is mandatory for books published from {} onward",
                PRICE_REQUIRED_FROM_YEAR
            ),
        ));
    }
    Ok(())
}

/// The (name, birth date, nationality) triple must be unique among authors,
/// excluding the candidate's own prior state during update.
pub fn check_unique_author(candidate_id: Option<Uuid>, existing: Option<&Author>) -> AppResult<()> {
    match existing {
        Some(found) if candidate_id != Some(found.id) => Err(AppError::Duplicate(
            "An author with this name, birth date and nationality is already registered"
                .to_string(),
        )),
        _ => Ok(()),
    }
}

/// An author cannot be deleted while any book references it
pub fn check_author_deletable(has_books: bool) -> AppResult<()> {
    if has_books {
        return Err(AppError::Conflict(
            "Author has registered books and cannot be deleted".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn existing_book(isbn: &str) -> Book {
        Book {
            id: Uuid::new_v4(),
            isbn: isbn.to_string(),
            title: "The Great Book".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2018, 3, 1).unwrap(),
            genre: crate::models::book::BookGenre::Fiction,
            price: None,
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn existing_author() -> Author {
        Author {
            id: Uuid::new_v4(),
            name: "Machado de Assis".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1839, 6, 21).unwrap(),
            nationality: "Brazilian".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn new_book_with_taken_isbn_is_duplicate() {
        let found = existing_book("111");
        let result = check_unique_isbn(None, Some(&found));
        assert!(matches!(result, Err(AppError::Duplicate(_))));
    }

    #[test]
    fn updating_a_book_keeping_its_own_isbn_succeeds() {
        let found = existing_book("111");
        assert!(check_unique_isbn(Some(found.id), Some(&found)).is_ok());
    }

    #[test]
    fn updating_a_book_to_another_books_isbn_is_duplicate() {
        let found = existing_book("111");
        let result = check_unique_isbn(Some(Uuid::new_v4()), Some(&found));
        assert!(matches!(result, Err(AppError::Duplicate(_))));
    }

    #[test]
    fn unique_isbn_passes_when_no_book_has_it() {
        assert!(check_unique_isbn(None, None).is_ok());
        assert!(check_unique_isbn(Some(Uuid::new_v4()), None).is_ok());
    }

    #[test]
    fn missing_price_from_cutoff_year_names_the_price_field() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let result = check_required_price(date, None);
        match result {
            Err(AppError::InvalidField { field, .. }) => assert_eq!(field, "price"),
            other => panic!("expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn missing_price_before_cutoff_year_is_allowed() {
        let date = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
        assert!(check_required_price(date, None).is_ok());
    }

    #[test]
    fn present_price_satisfies_the_rule_regardless_of_year() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let price = Decimal::new(4990, 2);
        assert!(check_required_price(date, Some(&price)).is_ok());
    }

    #[test]
    fn new_author_matching_an_existing_triple_is_duplicate() {
        let found = existing_author();
        let result = check_unique_author(None, Some(&found));
        assert!(matches!(result, Err(AppError::Duplicate(_))));
    }

    #[test]
    fn updating_an_author_keeping_its_own_triple_succeeds() {
        let found = existing_author();
        assert!(check_unique_author(Some(found.id), Some(&found)).is_ok());
    }

    #[test]
    fn author_without_books_can_be_deleted() {
        assert!(check_author_deletable(false).is_ok());
    }

    #[test]
    fn author_with_books_cannot_be_deleted() {
        let result = check_author_deletable(true);
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
