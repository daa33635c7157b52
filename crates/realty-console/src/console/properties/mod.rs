//! Residential catalogue: intake, publication, and management of listings.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ListingStatus, PropertyDraft, PropertyId, ResidentialProperty};
pub use repository::{CatalogueError, PropertyRepository};
pub use router::{catalogue_router, management_router};
pub use service::{ListingViolation, PropertyService, PropertyServiceError};
