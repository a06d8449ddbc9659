use crate::models::{Role, VerifiedIdentity};
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum RoleServiceError {
    #[error("Caller may not inspect or change this resource")]
    Forbidden,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

/// Derives role flags from stored user records.
pub struct RoleService {
    repository: Arc<dyn UserRepository>,
}

impl RoleService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Answers "does `email` hold `role`?" for the caller's own email only.
    ///
    /// A caller asking about any other address gets `Forbidden`, whatever
    /// that user's actual role is. An email without a record is simply
    /// `false`.
    pub async fn has_role(
        &self,
        email: &str,
        identity: &VerifiedIdentity,
        role: Role,
    ) -> Result<bool, RoleServiceError> {
        if email != identity.email() {
            tracing::warn!(
                requested = %email,
                caller = %identity.email(),
                "role lookup for another user rejected"
            );
            return Err(RoleServiceError::Forbidden);
        }

        let user = self.repository.find_by_email(email).await?;
        Ok(user.map(|u| u.has_role(role)).unwrap_or(false))
    }

    /// Fails with `Forbidden` unless the caller's own record holds `role`.
    pub async fn require_role(
        &self,
        identity: &VerifiedIdentity,
        role: Role,
    ) -> Result<(), RoleServiceError> {
        if self.has_role(identity.email(), identity, role).await? {
            Ok(())
        } else {
            tracing::warn!(caller = %identity.email(), required = %role, "insufficient role");
            Err(RoleServiceError::Forbidden)
        }
    }

    pub async fn require_admin(&self, identity: &VerifiedIdentity) -> Result<(), RoleServiceError> {
        self.require_role(identity, Role::Admin).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdentityClaims, User};
    use crate::repositories::user_repository::MockUserRepository;
    use mockall::predicate::*;
    use serde_json::Map;

    fn identity(email: &str) -> VerifiedIdentity {
        VerifiedIdentity(IdentityClaims::new(email))
    }

    fn repo_with_role(email: &'static str, role: Option<&'static str>) -> MockUserRepository {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .with(eq(email))
            .returning(move |email| {
                let user = User {
                    id: "u-1".to_string(),
                    email: email.to_string(),
                    role: role.map(str::to_string),
                    is_verify: true,
                    profile: Map::new(),
                };
                Box::pin(async move { Ok(Some(user)) })
            });
        mock_repo
    }

    #[tokio::test]
    async fn test_other_users_email_is_forbidden_without_lookup() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().times(0);
        let service = RoleService::new(Arc::new(mock_repo));

        let result = service
            .has_role("alice@example.com", &identity("bob@example.com"), Role::Admin)
            .await;
        assert!(matches!(result, Err(RoleServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn test_missing_record_is_false() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .with(eq("ghost@example.com"))
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));
        let service = RoleService::new(Arc::new(mock_repo));

        let result = service
            .has_role("ghost@example.com", &identity("ghost@example.com"), Role::Admin)
            .await
            .unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_exact_role_name_is_required() {
        let email = "alice@example.com";
        let cases = [
            (Some("Admin"), Role::Admin, true),
            (Some("HR"), Role::Admin, false),
            (Some("admin"), Role::Admin, false),
            (Some("HR"), Role::Hr, true),
            (Some("Employee"), Role::Hr, false),
            (None, Role::Hr, false),
        ];

        for (stored, role, expected) in cases {
            let service = RoleService::new(Arc::new(repo_with_role(email, stored)));
            let result = service.has_role(email, &identity(email), role).await.unwrap();
            assert_eq!(result, expected, "stored {:?} checked as {}", stored, role);
        }
    }

    #[tokio::test]
    async fn test_require_admin() {
        let service = RoleService::new(Arc::new(repo_with_role(
            "boss@example.com",
            Some("Admin"),
        )));
        assert!(service
            .require_admin(&identity("boss@example.com"))
            .await
            .is_ok());

        let service = RoleService::new(Arc::new(repo_with_role(
            "staff@example.com",
            Some("Employee"),
        )));
        assert!(matches!(
            service.require_admin(&identity("staff@example.com")).await,
            Err(RoleServiceError::Forbidden)
        ));
    }
}
