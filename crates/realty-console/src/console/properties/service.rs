use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{PropertyDraft, PropertyId, ResidentialProperty};
use super::repository::{CatalogueError, PropertyRepository};

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_property_id() -> PropertyId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PropertyId(format!("prop-{id:06}"))
}

/// Violations raised during listing intake validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListingViolation {
    #[error("listing name must not be empty")]
    MissingName,
    #[error("listing location must not be empty")]
    MissingLocation,
    #[error("listing price must be greater than zero")]
    ZeroPrice,
}

/// Error raised by the catalogue service.
#[derive(Debug, thiserror::Error)]
pub enum PropertyServiceError {
    #[error(transparent)]
    Listing(#[from] ListingViolation),
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

/// Service composing intake validation and the catalogue store.
pub struct PropertyService<R> {
    repository: Arc<R>,
}

impl<R> PropertyService<R>
where
    R: PropertyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    fn validate(draft: &PropertyDraft) -> Result<(), ListingViolation> {
        if draft.name.trim().is_empty() {
            return Err(ListingViolation::MissingName);
        }
        if draft.location.trim().is_empty() {
            return Err(ListingViolation::MissingLocation);
        }
        if draft.price == 0 {
            return Err(ListingViolation::ZeroPrice);
        }
        Ok(())
    }

    /// Intake a new listing and persist it.
    pub fn create(
        &self,
        draft: PropertyDraft,
        listed_on: NaiveDate,
    ) -> Result<ResidentialProperty, PropertyServiceError> {
        Self::validate(&draft)?;
        let record = ResidentialProperty::from_draft(next_property_id(), draft, listed_on);
        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Listings visible on the marketing site: active ones only.
    pub fn publicly_visible(&self) -> Result<Vec<ResidentialProperty>, PropertyServiceError> {
        let mut listings: Vec<ResidentialProperty> = self
            .repository
            .list()?
            .into_iter()
            .filter(ResidentialProperty::is_public)
            .collect();
        listings.sort_by(|a, b| b.listed_on.cmp(&a.listed_on));
        Ok(listings)
    }

    /// Every listing regardless of status, for the management console.
    pub fn catalogue(&self) -> Result<Vec<ResidentialProperty>, PropertyServiceError> {
        let mut listings = self.repository.list()?;
        listings.sort_by(|a, b| b.listed_on.cmp(&a.listed_on));
        Ok(listings)
    }

    /// Public detail view; drafts and pending listings stay hidden.
    pub fn get_public(&self, id: &PropertyId) -> Result<ResidentialProperty, PropertyServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .filter(ResidentialProperty::is_public)
            .ok_or(CatalogueError::NotFound)?;
        Ok(record)
    }

    /// Management detail view, any status.
    pub fn get(&self, id: &PropertyId) -> Result<ResidentialProperty, PropertyServiceError> {
        let record = self.repository.fetch(id)?.ok_or(CatalogueError::NotFound)?;
        Ok(record)
    }

    /// Replace a listing's attributes, keeping its identity and listing date.
    pub fn update(
        &self,
        id: &PropertyId,
        draft: PropertyDraft,
    ) -> Result<ResidentialProperty, PropertyServiceError> {
        Self::validate(&draft)?;
        let existing = self.repository.fetch(id)?.ok_or(CatalogueError::NotFound)?;
        let record = ResidentialProperty::from_draft(existing.id, draft, existing.listed_on);
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn delete(&self, id: &PropertyId) -> Result<(), PropertyServiceError> {
        self.repository.remove(id)?;
        Ok(())
    }
}
