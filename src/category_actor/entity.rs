use crate::actor_framework::Entity;
use crate::category_actor::CategoryError;
use crate::domain::{Category, CategoryCreate, CategoryPatch};

impl Entity for Category {
    type Id = String;
    type CreateParams = CategoryCreate;
    type Patch = CategoryPatch;
    type Action = ();
    type ActionResult = ();
    type Error = CategoryError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: CategoryCreate) -> Result<Self, CategoryError> {
        if params.name.trim().is_empty() {
            return Err(CategoryError::ValidationError(
                "name must not be empty".into(),
            ));
        }
        Ok(Self {
            id,
            name: params.name,
        })
    }

    /// Category names are unique.
    fn conflict_key(&self) -> Option<String> {
        Some(self.name.to_lowercase())
    }

    fn on_update(&mut self, patch: CategoryPatch) -> Result<(), CategoryError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(CategoryError::ValidationError(
                    "name must not be empty".into(),
                ));
            }
            self.name = name;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), CategoryError> {
        Ok(())
    }
}
