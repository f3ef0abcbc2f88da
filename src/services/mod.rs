//! Business logic services

pub mod books;
pub mod import;
pub mod open_library;
pub mod relations;

use crate::{config::OpenLibraryConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub books: books::BookCatalogService,
    pub import: import::CsvImportService,
    pub open_library: open_library::OpenLibraryService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, open_library: OpenLibraryConfig) -> AppResult<Self> {
        let books = books::BookCatalogService::new(repository.clone());

        Ok(Self {
            import: import::CsvImportService::new(books.clone()),
            open_library: open_library::OpenLibraryService::new(open_library)?,
            books,
            repository,
        })
    }
}
