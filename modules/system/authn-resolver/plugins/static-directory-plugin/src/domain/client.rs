//! `PrincipalDirectory` implementation backed by the domain service.

use async_trait::async_trait;
use authn_resolver_sdk::{DirectoryError, PrincipalDirectory, PrincipalRecord};
use tollgate_security::PrincipalId;

use super::service::Service;

#[async_trait]
impl PrincipalDirectory for Service {
    async fn find_principal_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<PrincipalRecord>, DirectoryError> {
        Ok(self.by_subject(subject).cloned())
    }

    async fn find_principal_by_id(
        &self,
        id: PrincipalId,
    ) -> Result<Option<PrincipalRecord>, DirectoryError> {
        Ok(self.by_id(id).cloned())
    }
}
