use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::console::properties::domain::{
    ListingStatus, PropertyDraft, PropertyId, ResidentialProperty,
};
use crate::console::properties::repository::{CatalogueError, PropertyRepository};
use crate::console::properties::service::PropertyService;

pub(super) fn listed_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub(super) fn draft(name: &str, status: ListingStatus) -> PropertyDraft {
    PropertyDraft {
        name: name.to_string(),
        location: "Sector 150, Noida".to_string(),
        price: 12_500_000,
        size_sqft: 1850,
        bedrooms: 3,
        bathrooms: 3,
        status,
    }
}

pub(super) fn build_service() -> (PropertyService<MemoryCatalogue>, Arc<MemoryCatalogue>) {
    let repository = Arc::new(MemoryCatalogue::default());
    let service = PropertyService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalogue {
    records: Arc<Mutex<HashMap<PropertyId, ResidentialProperty>>>,
}

impl PropertyRepository for MemoryCatalogue {
    fn insert(
        &self,
        record: ResidentialProperty,
    ) -> Result<ResidentialProperty, CatalogueError> {
        let mut guard = self.records.lock().expect("catalogue mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(CatalogueError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<ResidentialProperty>, CatalogueError> {
        let guard = self.records.lock().expect("catalogue mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<ResidentialProperty>, CatalogueError> {
        let guard = self.records.lock().expect("catalogue mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, record: ResidentialProperty) -> Result<(), CatalogueError> {
        let mut guard = self.records.lock().expect("catalogue mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(CatalogueError::NotFound)
        }
    }

    fn remove(&self, id: &PropertyId) -> Result<(), CatalogueError> {
        let mut guard = self.records.lock().expect("catalogue mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(CatalogueError::NotFound)
    }
}

pub(super) struct UnavailableCatalogue;

impl PropertyRepository for UnavailableCatalogue {
    fn insert(
        &self,
        _record: ResidentialProperty,
    ) -> Result<ResidentialProperty, CatalogueError> {
        Err(CatalogueError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ResidentialProperty>, CatalogueError> {
        Err(CatalogueError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PropertyId) -> Result<Option<ResidentialProperty>, CatalogueError> {
        Err(CatalogueError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ResidentialProperty) -> Result<(), CatalogueError> {
        Err(CatalogueError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &PropertyId) -> Result<(), CatalogueError> {
        Err(CatalogueError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
