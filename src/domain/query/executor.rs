//! In-process evaluation of a [`PageQuery`]: filter, order, skip/take.
//!
//! The ordering here is the reference the SQL rendering in
//! `storage::postgres::query` is written to reproduce.

use std::cmp::Ordering;

use super::{PageQuery, SortColumn, SortDirection};
use crate::domain::model::Book;

/// Case-insensitive substring match on title or author. Folding is Unicode
/// aware, as with `lower()`/`ILIKE` under a UTF-8 database locale.
pub fn matches(book: &Book, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    book.title.to_lowercase().contains(needle_lower)
        || book.author.to_lowercase().contains(needle_lower)
}

/// Orders by the resolved column in the resolved direction, then by id
/// ascending so that page boundaries are stable.
pub fn compare(a: &Book, b: &Book, column: SortColumn, direction: SortDirection) -> Ordering {
    let primary = match column {
        SortColumn::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortColumn::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
        SortColumn::Isbn => a
            .isbn
            .as_deref()
            .map(str::to_lowercase)
            .cmp(&b.isbn.as_deref().map(str::to_lowercase)),
        SortColumn::PublicationYear => a.publication_year.cmp(&b.publication_year),
    };
    let primary = match direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

pub fn execute_page<'a, I>(books: I, query: &PageQuery) -> Vec<Book>
where
    I: IntoIterator<Item = &'a Book>,
{
    let needle = query.search_term.to_lowercase();
    let mut hits: Vec<&Book> = books.into_iter().filter(|b| matches(b, &needle)).collect();
    hits.sort_by(|a, b| compare(a, b, query.column, query.direction));

    let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(query.limit).unwrap_or(0);
    hits.into_iter().skip(offset).take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::QuerySanitizer;

    fn book(id: i32, title: &str, author: &str, isbn: Option<&str>, year: i32) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.map(str::to_string),
            publication_year: year,
            quantity: 1,
            category_id: 1,
        }
    }

    fn shelf() -> Vec<Book> {
        vec![
            book(1, "The Shining", "Stephen King", Some("9780307743657"), 1977),
            book(2, "It", "Stephen King", Some("9781501142970"), 1986),
            book(3, "Clean Code", "Robert C. Martin", Some("9780132350884"), 2008),
            book(4, "The Pragmatic Programmer", "Andrew Hunt", None, 1999),
            book(5, "the shining", "Someone Else", None, 1977),
        ]
    }

    fn run(books: &[Book], n: i64, size: i64, term: &str, col: &str, dir: &str) -> Vec<i32> {
        let q = QuerySanitizer::default().sanitize(n, size, term, col, dir);
        execute_page(books, &q).into_iter().map(|b| b.id).collect()
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_author() {
        let books = shelf();
        assert_eq!(run(&books, 1, 10, "KING", "Title", "asc"), vec![2, 1]);
        assert_eq!(run(&books, 1, 10, "clean", "Title", "asc"), vec![3]);
        assert_eq!(run(&books, 1, 10, "nothing-like-this", "Title", "asc"), Vec::<i32>::new());
    }

    #[test]
    fn ties_break_on_id_in_both_directions() {
        let books = shelf();
        assert_eq!(run(&books, 1, 10, "shining", "Title", "asc"), vec![1, 5]);
        assert_eq!(run(&books, 1, 10, "shining", "Title", "desc"), vec![1, 5]);
        assert_eq!(run(&books, 1, 10, "", "PublicationYear", "desc"), vec![3, 4, 2, 1, 5]);
    }

    #[test]
    fn absent_isbn_sorts_first_ascending_and_last_descending() {
        let books = shelf();
        assert_eq!(run(&books, 1, 10, "", "ISBN", "asc"), vec![4, 5, 3, 1, 2]);
        assert_eq!(run(&books, 1, 10, "", "ISBN", "desc"), vec![2, 1, 3, 4, 5]);
    }

    #[test]
    fn pages_partition_the_ordered_matches() {
        let books = shelf();
        let all = run(&books, 1, 10, "", "Author", "asc");
        let mut paged = Vec::new();
        for page in 1..=3 {
            let ids = run(&books, page, 2, "", "Author", "asc");
            assert!(ids.len() <= 2);
            paged.extend(ids);
        }
        assert_eq!(paged, all);
    }

    #[test]
    fn offset_past_the_end_is_empty() {
        let books = shelf();
        assert!(run(&books, 4, 2, "", "Title", "asc").is_empty());
        assert!(run(&books, i64::MAX, 1000, "", "Title", "asc").is_empty());
    }

    #[test]
    fn non_ascii_letters_fold_like_a_utf8_database() {
        let mut books = shelf();
        books.push(book(6, "Émile", "Rousseau", None, 1762));
        assert_eq!(run(&books, 1, 10, "émile", "Title", "asc"), vec![6]);
        assert_eq!(run(&books, 1, 10, "ÉMILE", "Title", "asc"), vec![6]);
        // "é" sorts after every ASCII letter once lowercased.
        assert_eq!(run(&books, 1, 10, "", "Title", "asc").last(), Some(&6));
    }

    #[test]
    fn wildcards_in_the_term_are_literal() {
        let books = shelf();
        assert!(run(&books, 1, 10, "%", "Title", "asc").is_empty());
        assert!(run(&books, 1, 10, "_", "Title", "asc").is_empty());
    }
}
