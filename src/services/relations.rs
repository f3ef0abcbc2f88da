//! Get-or-create resolution of author and publisher references
//!
//! Name-only references arriving from request bodies, CSV rows or remote
//! metadata are resolved to stored rows and attached to a book without
//! duplicating rows or edges. Lookup is by exact name and the operation
//! only ever adds; removal is handled by the catalog service.

use crate::{
    error::AppResult,
    models::{AuthorInput, Book, PublisherInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct RelationshipResolver {
    repository: Repository,
}

impl RelationshipResolver {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Resolve each author name, in input order, to an existing or newly
    /// created row and append it to the book's author list when no entry
    /// with the same id is present yet. A duplicate name in the same call
    /// finds the row created for the first occurrence.
    pub async fn resolve_authors(&self, inputs: &[AuthorInput], book: &mut Book) -> AppResult<()> {
        for input in inputs {
            let author = match self.repository.authors.find_by_name(&input.name).await? {
                Some(existing) => existing,
                None => self.repository.authors.create(&input.name).await?,
            };

            if !book.authors.iter().any(|a| a.id == author.id) {
                book.authors.push(author);
            }
        }
        Ok(())
    }

    /// Same contract as `resolve_authors`, for publishers.
    pub async fn resolve_publishers(
        &self,
        inputs: &[PublisherInput],
        book: &mut Book,
    ) -> AppResult<()> {
        for input in inputs {
            let publisher = match self.repository.publishers.find_by_name(&input.name).await? {
                Some(existing) => existing,
                None => self.repository.publishers.create(&input.name).await?,
            };

            if !book.publishers.iter().any(|p| p.id == publisher.id) {
                book.publishers.push(publisher);
            }
        }
        Ok(())
    }
}
