use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use realty_console::auth::domain::{PrincipalId, Role};
use realty_console::console::careers::{CareerBoardError, CareerRepository, JobId, JobPosting};
use realty_console::console::contact::{ContactInfo, ContactRepository, ContactStoreError};
use realty_console::console::directory::{AccountRecord, DirectoryError, DirectoryRepository};
use realty_console::console::inquiries::{InboxError, Inquiry, InquiryId, InquiryRepository};
use realty_console::console::properties::{
    CatalogueError, PropertyId, PropertyRepository, ResidentialProperty,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalogue {
    records: Arc<Mutex<HashMap<PropertyId, ResidentialProperty>>>,
}

impl PropertyRepository for InMemoryCatalogue {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobBoard {
    postings: Arc<Mutex<HashMap<JobId, JobPosting>>>,
}

impl CareerRepository for InMemoryJobBoard {
    fn insert(&self, posting: JobPosting) -> Result<JobPosting, CareerBoardError> {
        let mut guard = self.postings.lock().expect("board mutex poisoned");
        if guard.contains_key(&posting.id) {
            return Err(CareerBoardError::Conflict);
        }
        guard.insert(posting.id.clone(), posting.clone());
        Ok(posting)
    }

    fn list(&self) -> Result<Vec<JobPosting>, CareerBoardError> {
        let guard = self.postings.lock().expect("board mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, CareerBoardError> {
        let guard = self.postings.lock().expect("board mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, posting: JobPosting) -> Result<(), CareerBoardError> {
        let mut guard = self.postings.lock().expect("board mutex poisoned");
        if guard.contains_key(&posting.id) {
            guard.insert(posting.id.clone(), posting);
            Ok(())
        } else {
            Err(CareerBoardError::NotFound)
        }
    }

    fn remove(&self, id: &JobId) -> Result<(), CareerBoardError> {
        let mut guard = self.postings.lock().expect("board mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(CareerBoardError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryInbox {
    inquiries: Arc<Mutex<HashMap<InquiryId, Inquiry>>>,
}

impl InquiryRepository for InMemoryInbox {
    fn insert(&self, inquiry: Inquiry) -> Result<Inquiry, InboxError> {
        let mut guard = self.inquiries.lock().expect("inbox mutex poisoned");
        if guard.contains_key(&inquiry.id) {
            return Err(InboxError::Conflict);
        }
        guard.insert(inquiry.id.clone(), inquiry.clone());
        Ok(inquiry)
    }

    fn list(&self) -> Result<Vec<Inquiry>, InboxError> {
        let guard = self.inquiries.lock().expect("inbox mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &InquiryId) -> Result<Option<Inquiry>, InboxError> {
        let guard = self.inquiries.lock().expect("inbox mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, inquiry: Inquiry) -> Result<(), InboxError> {
        let mut guard = self.inquiries.lock().expect("inbox mutex poisoned");
        if guard.contains_key(&inquiry.id) {
            guard.insert(inquiry.id.clone(), inquiry);
            Ok(())
        } else {
            Err(InboxError::NotFound)
        }
    }

    fn remove(&self, id: &InquiryId) -> Result<(), InboxError> {
        let mut guard = self.inquiries.lock().expect("inbox mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(InboxError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDirectory {
    accounts: Arc<Mutex<HashMap<PrincipalId, AccountRecord>>>,
}

impl DirectoryRepository for InMemoryDirectory {
    fn insert(&self, account: AccountRecord) -> Result<AccountRecord, DirectoryError> {
        let mut guard = self.accounts.lock().expect("directory mutex poisoned");
        if guard.contains_key(&account.id) {
            return Err(DirectoryError::Conflict);
        }
        guard.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    fn list(&self) -> Result<Vec<AccountRecord>, DirectoryError> {
        let guard = self.accounts.lock().expect("directory mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &PrincipalId) -> Result<Option<AccountRecord>, DirectoryError> {
        let guard = self.accounts.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, account: AccountRecord) -> Result<(), DirectoryError> {
        let mut guard = self.accounts.lock().expect("directory mutex poisoned");
        if guard.contains_key(&account.id) {
            guard.insert(account.id.clone(), account);
            Ok(())
        } else {
            Err(DirectoryError::NotFound)
        }
    }

    fn remove(&self, id: &PrincipalId) -> Result<(), DirectoryError> {
        let mut guard = self.accounts.lock().expect("directory mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(DirectoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryContactCard {
    info: Arc<Mutex<Option<ContactInfo>>>,
}

impl ContactRepository for InMemoryContactCard {
    fn load(&self) -> Result<Option<ContactInfo>, ContactStoreError> {
        Ok(self.info.lock().expect("contact mutex poisoned").clone())
    }

    fn store(&self, info: ContactInfo) -> Result<(), ContactStoreError> {
        *self.info.lock().expect("contact mutex poisoned") = Some(info);
        Ok(())
    }
}

/// Development fixtures so a fresh instance has something to show.
pub(crate) fn seed_directory(directory: &InMemoryDirectory) {
    let fixtures = [
        ("u-000001", "Site Owner", "owner@realty.local", Role::Superadmin),
        ("u-000002", "Console Admin", "admin@realty.local", Role::Admin),
        ("u-000003", "First Customer", "customer@realty.local", Role::Customer),
    ];

    for (id, name, email, role) in fixtures {
        let _ = directory.insert(AccountRecord {
            id: PrincipalId(id.to_string()),
            full_name: name.to_string(),
            email: email.to_string(),
            phone: None,
            role,
        });
    }
}

pub(crate) fn seed_contact(card: &InMemoryContactCard) {
    let _ = card.store(ContactInfo {
        email: "support@realty.local".to_string(),
        phone: "+91-120-000-0000".to_string(),
        address: "Tower B, Sector 62, Noida".to_string(),
    });
}
