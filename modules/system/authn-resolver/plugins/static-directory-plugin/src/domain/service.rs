//! Service implementation for the static principal directory.

use std::collections::HashMap;

use authn_resolver_sdk::PrincipalRecord;
use tollgate_security::{PrincipalId, Role};

use crate::config::StaticDirectoryConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("duplicate account id {0}")]
    DuplicateId(PrincipalId),

    #[error("duplicate account subject '{0}'")]
    DuplicateSubject(String),

    #[error("account {0} has an empty subject")]
    EmptySubject(PrincipalId),

    #[error("account '{0}' cannot be seeded with the DEMO role")]
    DemoAccount(String),
}

/// In-memory account store indexed by id and by subject.
#[derive(Debug, Default)]
pub struct Service {
    by_id: HashMap<PrincipalId, PrincipalRecord>,
    ids_by_subject: HashMap<String, PrincipalId>,
}

impl Service {
    /// Build the directory from configuration.
    ///
    /// # Errors
    ///
    /// Rejects duplicate ids or subjects, empty subjects and DEMO accounts.
    pub fn from_config(cfg: &StaticDirectoryConfig) -> Result<Self, ConfigError> {
        let mut svc = Self::default();
        for account in &cfg.accounts {
            if account.subject.is_empty() {
                return Err(ConfigError::EmptySubject(account.id));
            }
            if account.role == Role::Demo {
                return Err(ConfigError::DemoAccount(account.subject.clone()));
            }
            if svc.by_id.contains_key(&account.id) {
                return Err(ConfigError::DuplicateId(account.id));
            }
            if svc.ids_by_subject.contains_key(&account.subject) {
                return Err(ConfigError::DuplicateSubject(account.subject.clone()));
            }
            svc.ids_by_subject
                .insert(account.subject.clone(), account.id);
            svc.by_id.insert(
                account.id,
                PrincipalRecord::new(account.id, account.subject.clone(), account.role),
            );
        }
        tracing::info!(accounts = svc.by_id.len(), "static directory loaded");
        Ok(svc)
    }

    #[must_use]
    pub fn by_subject(&self, subject: &str) -> Option<&PrincipalRecord> {
        self.ids_by_subject
            .get(subject)
            .and_then(|id| self.by_id.get(id))
    }

    #[must_use]
    pub fn by_id(&self, id: PrincipalId) -> Option<&PrincipalRecord> {
        self.by_id.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
