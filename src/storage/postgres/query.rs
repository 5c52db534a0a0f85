//! SQL rendering of a [`PageQuery`].
//!
//! Only static fragments and the whitelisted sort enums are pushed as text;
//! the search pattern, limit and offset are always bound.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::query::PageQuery;

pub(crate) const BOOK_COLUMNS: &str =
    "id, title, author, isbn, publication_year, quantity, category_id";

pub(crate) fn build_page_query(query: &PageQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<'static, Postgres> = QueryBuilder::new("SELECT ");
    qb.push(BOOK_COLUMNS).push(" FROM books");

    if query.has_search() {
        qb.push(" WHERE (title ILIKE ")
            .push_bind(query.search_pattern.clone())
            .push(" ESCAPE '\\' OR author ILIKE ")
            .push_bind(query.search_pattern.clone())
            .push(" ESCAPE '\\')");
    }

    qb.push(" ORDER BY ")
        .push(query.column.sql_expr())
        .push(" ")
        .push(query.direction.sql_keyword())
        .push(", id ASC LIMIT ")
        .push_bind(query.limit)
        .push(" OFFSET ")
        .push_bind(query.offset);

    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::QuerySanitizer;

    fn sql_for(term: &str, col: &str, dir: &str) -> String {
        let q = QuerySanitizer::default().sanitize(2, 10, term, col, dir);
        build_page_query(&q).sql().to_string()
    }

    #[test]
    fn renders_filter_order_and_bounds_as_placeholders() {
        assert_eq!(
            sql_for("The", "Title", "ASC"),
            "SELECT id, title, author, isbn, publication_year, quantity, category_id FROM books \
             WHERE (title ILIKE $1 ESCAPE '\\' OR author ILIKE $2 ESCAPE '\\') \
             ORDER BY lower(title) COLLATE \"C\" ASC NULLS FIRST, id ASC LIMIT $3 OFFSET $4"
        );
    }

    #[test]
    fn empty_search_omits_the_filter() {
        assert_eq!(
            sql_for("", "PublicationYear", "desc"),
            "SELECT id, title, author, isbn, publication_year, quantity, category_id FROM books \
             ORDER BY publication_year DESC NULLS LAST, id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn injected_inputs_never_reach_the_query_text() {
        let payload = "'; DROP TABLE Books;--";
        let baseline = sql_for("x", "Title", "ASC");
        for (term, col, dir) in [
            (payload, "Title", "ASC"),
            ("x", payload, "ASC"),
            ("x", "Title", payload),
            ("x", "Title DESC; DELETE FROM books", "ASC"),
        ] {
            let sql = sql_for(term, col, dir);
            assert!(!sql.contains("DROP"), "{}", sql);
            assert!(!sql.contains("DELETE"), "{}", sql);
            assert!(!sql.contains(';'), "{}", sql);
            if term == "x" {
                assert_eq!(sql, baseline);
            }
        }
    }

    #[test]
    fn every_column_renders_a_static_expression() {
        for (col, expr) in [
            ("author", "lower(author) COLLATE \"C\""),
            ("ISBN", "lower(isbn) COLLATE \"C\""),
            ("publicationyear", "publication_year"),
        ] {
            assert!(sql_for("", col, "asc").contains(&format!("ORDER BY {} ASC", expr)));
        }
    }
}
