//! Dynamic query specifications for book search.
//!
//! Each supplied search field contributes one [`BookSpec`] clause; absent
//! fields contribute nothing. Clauses are combined with AND by the query
//! layer, so an empty composition matches every book. Every clause can both
//! render itself into a SQL WHERE fragment (with bound parameters) and
//! evaluate itself in memory against a joined book row.

use sqlx::{Postgres, QueryBuilder};

use crate::models::book::{BookDetails, BookGenre, BookSearchQuery};

/// A single conjunctive filter clause over books
#[derive(Debug, Clone, PartialEq)]
pub enum BookSpec {
    /// Exact, case-sensitive ISBN equality
    IsbnEqual(String),
    /// Case-insensitive substring match on the title
    TitleLike(String),
    /// Exact genre equality
    GenreEqual(BookGenre),
    /// Equality against the year component of the publication date
    PublicationYearEqual(i32),
    /// Case-insensitive substring match on the joined author's name
    AuthorNameLike(String),
}

impl BookSpec {
    /// Append this clause to a query builder as `AND <condition>`.
    ///
    /// Conditions reference the aliases used by the search queries:
    /// `b` for books, `a` for the joined authors table.
    pub fn push_condition(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            BookSpec::IsbnEqual(isbn) => {
                qb.push(" AND b.isbn = ");
                qb.push_bind(isbn.clone());
            }
            BookSpec::TitleLike(title) => {
                qb.push(" AND b.title ILIKE ");
                qb.push_bind(format!("%{}%", title));
            }
            BookSpec::GenreEqual(genre) => {
                qb.push(" AND b.genre = ");
                qb.push_bind(*genre);
            }
            BookSpec::PublicationYearEqual(year) => {
                qb.push(" AND date_part('year', b.publication_date)::int = ");
                qb.push_bind(*year);
            }
            BookSpec::AuthorNameLike(name) => {
                qb.push(" AND a.name ILIKE ");
                qb.push_bind(format!("%{}%", name));
            }
        }
    }

    /// Evaluate this clause against a joined book row
    pub fn matches(&self, book: &BookDetails) -> bool {
        match self {
            BookSpec::IsbnEqual(isbn) => book.isbn == *isbn,
            BookSpec::TitleLike(title) => book
                .title
                .to_lowercase()
                .contains(&title.to_lowercase()),
            BookSpec::GenreEqual(genre) => book.genre == *genre,
            BookSpec::PublicationYearEqual(year) => {
                use chrono::Datelike;
                book.publication_date.year() == *year
            }
            BookSpec::AuthorNameLike(name) => book
                .author_name
                .to_lowercase()
                .contains(&name.to_lowercase()),
        }
    }
}

/// Build the clause list for the given criteria, skipping absent fields.
///
/// The result is a pure value: composing the same criteria twice yields the
/// same clauses, and applying them to an unchanged collection yields the
/// same result set.
pub fn compose_filter(query: &BookSearchQuery) -> Vec<BookSpec> {
    let mut specs = Vec::new();

    if let Some(ref isbn) = query.isbn {
        specs.push(BookSpec::IsbnEqual(isbn.clone()));
    }
    if let Some(ref title) = query.title {
        specs.push(BookSpec::TitleLike(title.clone()));
    }
    if let Some(genre) = query.genre {
        specs.push(BookSpec::GenreEqual(genre));
    }
    if let Some(year) = query.year {
        specs.push(BookSpec::PublicationYearEqual(year));
    }
    if let Some(ref name) = query.author_name {
        specs.push(BookSpec::AuthorNameLike(name.clone()));
    }

    specs
}

/// Whether a joined book row satisfies every clause (AND semantics)
pub fn matches_all(specs: &[BookSpec], book: &BookDetails) -> bool {
    specs.iter().all(|spec| spec.matches(book))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn book(isbn: &str, title: &str, genre: BookGenre, year: i32, author: &str) -> BookDetails {
        BookDetails {
            id: Uuid::new_v4(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            publication_date: NaiveDate::from_ymd_opt(year, 6, 15).unwrap(),
            genre,
            price: None,
            author_id: Uuid::new_v4(),
            author_name: author.to_string(),
        }
    }

    fn collection() -> Vec<BookDetails> {
        vec![
            book("111", "The Great Book", BookGenre::Fiction, 2018, "Machado de Assis"),
            book("222", "Deep Space", BookGenre::Science, 2021, "Carl Sagan"),
            book("333", "Great Expectations", BookGenre::Fiction, 2021, "Charles Dickens"),
        ]
    }

    #[test]
    fn empty_criteria_matches_every_record() {
        let specs = compose_filter(&BookSearchQuery::default());
        assert!(specs.is_empty());
        for b in collection() {
            assert!(matches_all(&specs, &b));
        }
    }

    #[test]
    fn isbn_only_matches_exactly_one_record() {
        let query = BookSearchQuery {
            isbn: Some("222".to_string()),
            ..Default::default()
        };
        let specs = compose_filter(&query);
        let matched: Vec<_> = collection()
            .into_iter()
            .filter(|b| matches_all(&specs, b))
            .collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].isbn, "222");
    }

    #[test]
    fn isbn_match_is_case_sensitive_exact() {
        let spec = BookSpec::IsbnEqual("11".to_string());
        assert!(!spec.matches(&book("111", "t", BookGenre::Fiction, 2018, "a")));
    }

    #[test]
    fn title_match_is_case_insensitive_substring() {
        let spec = BookSpec::TitleLike("great".to_string());
        assert!(spec.matches(&book("111", "The Great Book", BookGenre::Fiction, 2018, "a")));
        assert!(!spec.matches(&book("222", "Deep Space", BookGenre::Science, 2021, "a")));
    }

    #[test]
    fn author_name_match_is_case_insensitive_substring() {
        let spec = BookSpec::AuthorNameLike("sagan".to_string());
        assert!(spec.matches(&book("222", "Deep Space", BookGenre::Science, 2021, "Carl Sagan")));
        assert!(!spec.matches(&book("111", "t", BookGenre::Fiction, 2018, "Machado de Assis")));
    }

    #[test]
    fn year_matches_publication_year_component() {
        let spec = BookSpec::PublicationYearEqual(2021);
        assert!(spec.matches(&book("222", "Deep Space", BookGenre::Science, 2021, "a")));
        assert!(!spec.matches(&book("111", "t", BookGenre::Fiction, 2018, "a")));
    }

    #[test]
    fn supplied_conditions_are_conjunctive() {
        let query = BookSearchQuery {
            title: Some("great".to_string()),
            genre: Some(BookGenre::Fiction),
            year: Some(2021),
            ..Default::default()
        };
        let specs = compose_filter(&query);
        let matched: Vec<_> = collection()
            .into_iter()
            .filter(|b| matches_all(&specs, b))
            .collect();
        // "The Great Book" fails the year clause, only "Great Expectations" passes all three
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].isbn, "333");
    }

    #[test]
    fn composition_is_idempotent() {
        let query = BookSearchQuery {
            title: Some("great".to_string()),
            genre: Some(BookGenre::Fiction),
            ..Default::default()
        };
        let first = compose_filter(&query);
        let second = compose_filter(&query);
        assert_eq!(first, second);

        let matched = |specs: &[BookSpec]| {
            collection()
                .into_iter()
                .filter(|b| matches_all(specs, b))
                .map(|b| b.isbn)
                .collect::<Vec<_>>()
        };
        assert_eq!(matched(&first), matched(&second));
    }
}
