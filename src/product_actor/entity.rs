use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::ProductError;

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ();
    type ActionResult = ();
    type Error = ProductError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        if params.name.trim().is_empty() {
            return Err(ProductError::ValidationError(
                "name must not be empty".into(),
            ));
        }
        if params.price < 0.0 {
            return Err(ProductError::NegativePrice(params.price));
        }
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            image_filename: params.image_filename,
            category_id: params.category_id,
        })
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(price) = patch.price {
            if price < 0.0 {
                return Err(ProductError::NegativePrice(price));
            }
            self.price = price;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image_filename) = patch.image_filename {
            self.image_filename = image_filename;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), ProductError> {
        Ok(())
    }
}
