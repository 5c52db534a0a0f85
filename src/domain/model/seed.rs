//! Demo catalog content used by `preflight --seed` and the test suites.

use super::{NewBook, NewCategory};

pub const FICTION: &str = "Fiction";
pub const NON_FICTION: &str = "Non-Fiction";

pub fn demo_categories() -> Vec<NewCategory> {
    vec![
        NewCategory {
            name: FICTION.to_string(),
            description: Some("Fiction books".to_string()),
        },
        NewCategory {
            name: NON_FICTION.to_string(),
            description: Some("Non-Fiction books".to_string()),
        },
    ]
}

/// The four-book starter catalog: two fiction, two non-fiction.
pub fn demo_books(fiction_id: i32, non_fiction_id: i32) -> Vec<NewBook> {
    vec![
        book("The Shining", "Stephen King", "9780307743657", 1977, 10, fiction_id),
        book("It", "Stephen King", "9781501142970", 1986, 5, fiction_id),
        book(
            "Clean Code: A Handbook of Agile Software Craftsmanship",
            "Robert C. Martin",
            "9780132350884",
            2008,
            8,
            non_fiction_id,
        ),
        book(
            "The Pragmatic Programmer: Your Journey to Mastery",
            "Andrew Hunt, David Thomas",
            "9780201616224",
            1999,
            6,
            non_fiction_id,
        ),
    ]
}

/// A larger set layered on top of the starter catalog for manual browsing.
pub fn extended_books(fiction_id: i32, non_fiction_id: i32) -> Vec<NewBook> {
    vec![
        book("Catch-22", "Joseph Heller", "9781451626650", 1961, 7, fiction_id),
        book("The Odyssey", "Homer", "9780143039952", -800, 9, fiction_id),
        book("Frankenstein", "Mary Shelley", "9780486282114", 1818, 6, fiction_id),
        book("The Picture of Dorian Gray", "Oscar Wilde", "9780141439570", 1890, 5, fiction_id),
        book("Les Misérables", "Victor Hugo", "9780140444308", 1862, 4, fiction_id),
        book(
            "Astrophysics for People in a Hurry",
            "Neil deGrasse Tyson",
            "9780393609394",
            2017,
            8,
            non_fiction_id,
        ),
        book("Into the Wild", "Jon Krakauer", "9780385486804", 1996, 10, non_fiction_id),
        book(
            "The Gene: An Intimate History",
            "Siddhartha Mukherjee",
            "9781476733531",
            2016,
            12,
            non_fiction_id,
        ),
        book(
            "The Body: A Guide for Occupants",
            "Bill Bryson",
            "9780385539302",
            2019,
            6,
            non_fiction_id,
        ),
        book("The Power of Habit", "Charles Duhigg", "9781400069286", 2012, 9, non_fiction_id),
    ]
}

fn book(
    title: &str,
    author: &str,
    isbn: &str,
    publication_year: i32,
    quantity: i32,
    category_id: i32,
) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: author.to_string(),
        isbn: Some(isbn.to_string()),
        publication_year,
        quantity,
        category_id,
    }
}
