use tracing::{info, instrument};

use crate::access::{require_admin, Identity, PasswordHasher};
use crate::actor_framework::ResourceClient;
use crate::clients::CartClient;
use crate::domain::{User, UserCreate};
use crate::user_actor::UserError;

/// Accounts: registration, credential checks, and the admin user list.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
    cart: CartClient,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>, cart: CartClient) -> Self {
        Self { inner, cart }
    }

    /// Register a new customer account. Email uniqueness is enforced by the
    /// user actor; duplicates come back as [`UserError::AlreadyExists`].
    #[instrument(skip(self, password, hasher))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<String, UserError> {
        self.create_account(name, email, password, false, hasher).await
    }

    /// Seed an administrator account. Intended for bootstrap, not exposed to
    /// the public signup path.
    pub async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<String, UserError> {
        self.create_account(name, email, password, true, hasher).await
    }

    async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        is_admin: bool,
        hasher: &dyn PasswordHasher,
    ) -> Result<String, UserError> {
        if password.is_empty() {
            return Err(UserError::ValidationError("password must not be empty".to_string()));
        }
        let id = self
            .inner
            .create(UserCreate {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hasher.hash(password),
                is_admin,
            })
            .await?;
        info!(user_id = %id, is_admin, "Account created");
        Ok(id)
    }

    /// Verify credentials and hand back an [`Identity`] for subsequent calls.
    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, password, hasher))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<Identity, UserError> {
        let users = self.inner.list().await?;
        let user = users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email));
        match user {
            Some(u) if hasher.verify(password, &u.password_hash) => Ok(Identity::from(u)),
            _ => Err(UserError::InvalidCredentials),
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, UserError> {
        self.inner.get(user_id.to_string()).await
    }

    pub async fn list_users(&self, identity: &Identity) -> Result<Vec<User>, UserError> {
        require_admin(Some(identity))?;
        let mut users = self.inner.list().await?;
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    /// Remove an account and purge its cart. Orders keep their `user_id`
    /// reference so history stays intact. Admins cannot delete themselves.
    #[instrument(skip(self, identity), fields(admin = %identity.user_id))]
    pub async fn delete_user(&self, identity: &Identity, target_id: &str) -> Result<(), UserError> {
        require_admin(Some(identity))?;
        if identity.user_id == target_id {
            return Err(UserError::SelfDeletion);
        }
        self.inner.delete(target_id.to_string()).await?;
        self.cart
            .purge_user(target_id)
            .await
            .map_err(|e| UserError::ActorCommunicationError(e.to_string()))?;
        info!(user_id = %target_id, "User deleted");
        Ok(())
    }
}
