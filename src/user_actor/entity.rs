use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate};
use crate::user_actor::UserError;

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = (); // No account-edit flow; rows change only through delete.
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: UserCreate) -> Result<Self, UserError> {
        if params.name.trim().is_empty() {
            return Err(UserError::ValidationError("name must not be empty".into()));
        }
        if !params.email.contains('@') {
            return Err(UserError::ValidationError(format!(
                "invalid email address: {}",
                params.email
            )));
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            password_hash: params.password_hash,
            is_admin: params.is_admin,
        })
    }

    /// Emails must be unique across all accounts.
    fn conflict_key(&self) -> Option<String> {
        Some(self.email.to_lowercase())
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), UserError> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}
