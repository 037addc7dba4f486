//! In-test directories.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use authn_resolver_sdk::{DirectoryError, PrincipalDirectory, PrincipalRecord};
use tollgate_security::PrincipalId;

#[derive(Default)]
pub struct MemoryDirectory {
    records: Vec<PrincipalRecord>,
    lookups: AtomicUsize,
}

impl MemoryDirectory {
    pub fn with(records: Vec<PrincipalRecord>) -> Self {
        Self {
            records,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrincipalDirectory for MemoryDirectory {
    async fn find_principal_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<PrincipalRecord>, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.iter().find(|r| r.subject == subject).cloned())
    }

    async fn find_principal_by_id(
        &self,
        id: PrincipalId,
    ) -> Result<Option<PrincipalRecord>, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}

pub struct UnavailableDirectory;

#[async_trait]
impl PrincipalDirectory for UnavailableDirectory {
    async fn find_principal_by_subject(
        &self,
        _subject: &str,
    ) -> Result<Option<PrincipalRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_owned()))
    }

    async fn find_principal_by_id(
        &self,
        _id: PrincipalId,
    ) -> Result<Option<PrincipalRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_owned()))
    }
}
