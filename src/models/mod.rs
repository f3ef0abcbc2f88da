//! Data models for the book catalog

pub mod author;
pub mod book;
pub mod import_report;
pub mod publisher;

pub use author::{Author, AuthorInput, AuthorView};
pub use book::{Book, BookInput, BookQuery, BookView, RemoteBook};
pub use import_report::{ImportError, ImportReport};
pub use publisher::{Publisher, PublisherInput, PublisherView};
