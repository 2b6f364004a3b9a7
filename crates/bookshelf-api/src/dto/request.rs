//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use bookshelf_entity::{AuthorFilter, AuthorPatch, BookFilter, BookPatch, NewAuthor, NewBook};

/// Create author request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    /// First name.
    #[validate(length(min = 1, message = "firstName must not be empty"))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, message = "lastName must not be empty"))]
    pub last_name: String,
    /// Biography.
    pub bio: Option<String>,
    /// Date of birth (`YYYY-MM-DD`).
    pub birth_date: Option<NaiveDate>,
}

impl From<CreateAuthorRequest> for NewAuthor {
    fn from(req: CreateAuthorRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            birth_date: req.birth_date,
        }
    }
}

/// Update author request body. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    /// First name.
    #[validate(length(min = 1, message = "firstName must not be empty"))]
    pub first_name: Option<String>,
    /// Last name.
    #[validate(length(min = 1, message = "lastName must not be empty"))]
    pub last_name: Option<String>,
    /// Biography.
    pub bio: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
}

impl From<UpdateAuthorRequest> for AuthorPatch {
    fn from(req: UpdateAuthorRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            birth_date: req.birth_date,
        }
    }
}

/// Create book request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    /// Title.
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    /// ISBN-10 or ISBN-13; hyphens and spaces are allowed.
    #[validate(custom(function = "validate_isbn"))]
    pub isbn: String,
    /// Publication date (`YYYY-MM-DD`).
    pub published_date: Option<NaiveDate>,
    /// Genre.
    pub genre: Option<String>,
    /// Owning author.
    pub author_id: Uuid,
}

impl From<CreateBookRequest> for NewBook {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            title: req.title,
            isbn: req.isbn,
            published_date: req.published_date,
            genre: req.genre,
            author_id: req.author_id,
        }
    }
}

/// Update book request body. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    /// Title.
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    /// ISBN-10 or ISBN-13.
    #[validate(custom(function = "validate_isbn"))]
    pub isbn: Option<String>,
    /// Publication date.
    pub published_date: Option<NaiveDate>,
    /// Genre.
    pub genre: Option<String>,
    /// Owning author.
    pub author_id: Option<Uuid>,
}

impl From<UpdateBookRequest> for BookPatch {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            title: req.title,
            isbn: req.isbn,
            published_date: req.published_date,
            genre: req.genre,
            author_id: req.author_id,
        }
    }
}

/// Author list filter (`?search=`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorListQuery {
    /// Case-insensitive term matched against first or last name.
    #[validate(length(max = 200))]
    pub search: Option<String>,
}

impl From<AuthorListQuery> for AuthorFilter {
    fn from(query: AuthorListQuery) -> Self {
        Self {
            search: query.search,
        }
    }
}

/// Book list filter (`?search=&authorId=`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookListQuery {
    /// Case-insensitive term matched against title or ISBN.
    #[validate(length(max = 200))]
    pub search: Option<String>,
    /// Only books owned by this author.
    pub author_id: Option<Uuid>,
}

impl From<BookListQuery> for BookFilter {
    fn from(query: BookListQuery) -> Self {
        Self {
            search: query.search,
            author_id: query.author_id,
        }
    }
}

/// Accepts ISBN-10 (last character may be `X`) and ISBN-13 with valid check digits.
pub fn validate_isbn(isbn: &str) -> Result<(), ValidationError> {
    let chars: Vec<char> = isbn.chars().filter(|c| !matches!(c, '-' | ' ')).collect();
    let valid = match chars.len() {
        10 => isbn10_checksum(&chars),
        13 => isbn13_checksum(&chars),
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("isbn");
        err.message = Some("isbn must be a valid ISBN-10 or ISBN-13".into());
        Err(err)
    }
}

fn isbn10_checksum(chars: &[char]) -> bool {
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let digit = match (i, c) {
            (9, 'X' | 'x') => 10,
            (_, c) => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += digit * (10 - i as u32);
    }
    sum % 11 == 0
}

fn isbn13_checksum(chars: &[char]) -> bool {
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }
    sum % 10 == 0
}
