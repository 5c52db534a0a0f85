//! Normalizes caller-supplied paging/search/sort arguments.
//!
//! Sort column and direction are resolved to closed enums here; only their
//! static SQL renderings are ever embedded in query text. Search term and
//! paging bounds leave this module as plain values meant for binding.

use tracing::debug;

pub const DEFAULT_MAX_PAGE_SIZE: i64 = 1000;

/// Whitelisted sort columns. Anything else resolves to `Title`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortColumn {
    #[default]
    Title,
    Author,
    Isbn,
    PublicationYear,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::Title,
        SortColumn::Author,
        SortColumn::Isbn,
        SortColumn::PublicationYear,
    ];

    /// Canonical external name, as accepted from callers.
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Title => "Title",
            SortColumn::Author => "Author",
            SortColumn::Isbn => "ISBN",
            SortColumn::PublicationYear => "PublicationYear",
        }
    }

    /// Exact-name match, ASCII case-insensitive, ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            debug!(target: "book_catalog::query", sort_column = raw, "unknown sort column, using Title");
            Self::default()
        })
    }

    /// ORDER BY expression for the `books` table. Text keys are lowercased and
    /// byte-ordered. This matches the in-process executor exactly for ASCII
    /// text. For non-ASCII letters `lower()` follows the database's `LC_CTYPE`,
    /// so under a C-locale database "É" is not folded while Rust folds it.
    pub(crate) fn sql_expr(self) -> &'static str {
        match self {
            SortColumn::Title => "lower(title) COLLATE \"C\"",
            SortColumn::Author => "lower(author) COLLATE \"C\"",
            SortColumn::Isbn => "lower(isbn) COLLATE \"C\"",
            SortColumn::PublicationYear => "publication_year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            debug!(target: "book_catalog::query", sort_direction = raw, "unknown sort direction, using ASC");
            Self::default()
        })
    }

    /// Keyword plus null placement. Absent values sort first ascending and
    /// last descending, mirroring `Option` ordering.
    pub(crate) fn sql_keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC NULLS FIRST",
            SortDirection::Desc => "DESC NULLS LAST",
        }
    }
}

/// A fully normalized paged query. Constructed only through [`QuerySanitizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub offset: i64,
    pub limit: i64,
    /// Raw search term, whitespace included; empty matches every book.
    pub search_term: String,
    /// `%term%` with LIKE metacharacters escaped by backslash.
    pub search_pattern: String,
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl PageQuery {
    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QuerySanitizer {
    max_page_size: i64,
}

impl Default for QuerySanitizer {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl QuerySanitizer {
    pub fn new(max_page_size: i64) -> Self {
        Self {
            max_page_size: max_page_size.max(1),
        }
    }

    /// Non-positive page numbers and sizes are clamped to 1; sizes above the
    /// configured maximum are clamped down to it. Never fails.
    pub fn sanitize(
        &self,
        page_number: i64,
        page_size: i64,
        search_term: &str,
        sort_column: &str,
        sort_direction: &str,
    ) -> PageQuery {
        let page_number = page_number.max(1);
        let limit = page_size.clamp(1, self.max_page_size);
        let offset = (page_number - 1).saturating_mul(limit);

        let search_term = search_term.to_string();
        let search_pattern = format!("%{}%", escape_like(&search_term));

        PageQuery {
            offset,
            limit,
            search_term,
            search_pattern,
            column: SortColumn::resolve(sort_column),
            direction: SortDirection::resolve(sort_direction),
        }
    }
}

/// Escapes `\`, `%` and `_` so the term only ever matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
