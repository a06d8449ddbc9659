use crate::models::{InsertResult, NewUser, RegisterOutcome, Role, UpdateResult, User};
use crate::repositories::user_repository::{RepositoryError, UpdateCounts, UserRepository};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Role '{0}' cannot be chosen at registration")]
    RoleNotAllowed(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Stores a new user unless one with the same email already exists.
    ///
    /// A duplicate is not an error: it yields the `user exist` outcome and
    /// nothing is written.
    pub async fn register(
        &self,
        mut new_user: NewUser,
    ) -> Result<RegisterOutcome, UserServiceError> {
        self.validate_email(&new_user.email)?;
        self.validate_initial_role(new_user.role.as_deref())?;

        // The store assigns identifiers; verification is granted by an admin.
        new_user.profile.remove("_id");
        new_user.is_verify = false;

        if self
            .repository
            .find_by_email(&new_user.email)
            .await?
            .is_some()
        {
            tracing::debug!(email = %new_user.email, "registration skipped, user exists");
            return Ok(RegisterOutcome::already_exists());
        }

        let id = self.repository.insert_user(&new_user).await?;
        tracing::info!(user_id = %id, "registered user");

        Ok(RegisterOutcome::Inserted(InsertResult::new(id)))
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.list_users().await?)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_email(email).await?)
    }

    /// Overwrites the role of the user with `id`. An unknown id reports zero
    /// matched records rather than failing.
    pub async fn set_role(&self, id: &str, role: Role) -> Result<UpdateResult, UserServiceError> {
        let counts = self.repository.set_role(id, role.as_str()).await?;
        tracing::info!(user_id = %id, role = %role, matched = counts.matched, "role updated");
        Ok(to_update_result(counts))
    }

    pub async fn set_verified(
        &self,
        id: &str,
        verified: bool,
    ) -> Result<UpdateResult, UserServiceError> {
        let counts = self.repository.set_verified(id, verified).await?;
        tracing::info!(user_id = %id, verified, matched = counts.matched, "verification updated");
        Ok(to_update_result(counts))
    }

    /// Same as [`UserService::set_role`] but addressed by email; used by the CLI.
    pub async fn set_role_by_email(
        &self,
        email: &str,
        role: Role,
    ) -> Result<UpdateResult, UserServiceError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserServiceError::UserNotFound)?;
        self.set_role(&user.id, role).await
    }

    pub async fn set_verified_by_email(
        &self,
        email: &str,
        verified: bool,
    ) -> Result<UpdateResult, UserServiceError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserServiceError::UserNotFound)?;
        self.set_verified(&user.id, verified).await
    }

    fn validate_email(&self, email: &str) -> Result<(), UserServiceError> {
        if !email.contains('@') || email.len() > 255 || email.is_empty() {
            return Err(UserServiceError::InvalidEmail);
        }
        Ok(())
    }

    fn validate_initial_role(&self, role: Option<&str>) -> Result<(), UserServiceError> {
        match role {
            None => Ok(()),
            Some(name) => match name.parse::<Role>() {
                Ok(Role::Hr) | Ok(Role::Employee) => Ok(()),
                _ => Err(UserServiceError::RoleNotAllowed(name.to_string())),
            },
        }
    }
}

fn to_update_result(counts: UpdateCounts) -> UpdateResult {
    UpdateResult::new(counts.matched, counts.modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use mockall::predicate::*;
    use serde_json::Map;

    fn existing_user(email: &str) -> User {
        User {
            id: "u-1".to_string(),
            email: email.to_string(),
            role: None,
            is_verify: false,
            profile: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_register_existing_email_does_not_insert() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .with(eq("taken@example.com"))
            .times(1)
            .returning(|email| {
                let user = existing_user(email);
                Box::pin(async move { Ok(Some(user)) })
            });
        mock_repo.expect_insert_user().times(0);

        let service = UserService::new(Arc::new(mock_repo));
        let outcome = service
            .register(NewUser::new("taken@example.com"))
            .await
            .unwrap();

        assert_eq!(outcome, RegisterOutcome::already_exists());
    }

    #[tokio::test]
    async fn test_register_new_email_inserts_once() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo
            .expect_insert_user()
            .withf(|user| user.email == "new@example.com" && !user.profile.contains_key("_id"))
            .times(1)
            .returning(|_| Box::pin(async move { Ok("u-42".to_string()) }));

        let service = UserService::new(Arc::new(mock_repo));
        let mut new_user = NewUser::new("new@example.com");
        new_user
            .profile
            .insert("_id".to_string(), serde_json::json!("client-chosen"));

        let outcome = service.register(new_user).await.unwrap();
        assert_eq!(outcome, RegisterOutcome::Inserted(InsertResult::new("u-42")));
    }

    #[tokio::test]
    async fn test_register_ignores_requested_verification() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo
            .expect_insert_user()
            .withf(|user| !user.is_verify && user.role.as_deref() == Some("HR"))
            .times(1)
            .returning(|_| Box::pin(async move { Ok("u-7".to_string()) }));

        let service = UserService::new(Arc::new(mock_repo));
        let mut new_user = NewUser::new("eve@example.com").with_role(Role::Hr);
        new_user.is_verify = true;

        let outcome = service.register(new_user).await.unwrap();
        assert_eq!(outcome, RegisterOutcome::Inserted(InsertResult::new("u-7")));
    }

    #[tokio::test]
    async fn test_register_rejects_admin_self_assignment() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(mock_repo));

        let result = service
            .register(NewUser::new("eve@example.com").with_role(Role::Admin))
            .await;
        assert!(matches!(result, Err(UserServiceError::RoleNotAllowed(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));
        let result = service.register(NewUser::new("nope")).await;
        assert!(matches!(result, Err(UserServiceError::InvalidEmail)));
    }

    #[tokio::test]
    async fn test_set_role_unknown_id_reports_zero_counts() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_set_role()
            .with(eq("missing"), eq("HR"))
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(UpdateCounts::default()) }));

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.set_role("missing", Role::Hr).await.unwrap();
        assert_eq!(result, UpdateResult::new(0, 0));
    }
}
