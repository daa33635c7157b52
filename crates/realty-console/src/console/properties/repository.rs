use super::domain::{PropertyId, ResidentialProperty};

/// Storage abstraction so the catalogue can be exercised in isolation.
pub trait PropertyRepository: Send + Sync {
    fn insert(&self, record: ResidentialProperty)
        -> Result<ResidentialProperty, CatalogueError>;
    fn list(&self) -> Result<Vec<ResidentialProperty>, CatalogueError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<ResidentialProperty>, CatalogueError>;
    fn update(&self, record: ResidentialProperty) -> Result<(), CatalogueError>;
    fn remove(&self, id: &PropertyId) -> Result<(), CatalogueError>;
}

/// Error enumeration for catalogue storage failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("listing already exists")]
    Conflict,
    #[error("listing not found")]
    NotFound,
    #[error("catalogue unavailable: {0}")]
    Unavailable(String),
}
