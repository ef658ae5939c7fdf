use std::path::PathBuf;

use tracing::{info, instrument};

use crate::access::{require_admin, Identity};
use crate::actor_framework::ResourceClient;
use crate::category_actor::CategoryError;
use crate::clients::CartClient;
use crate::domain::{Category, CategoryCreate, CategoryPatch, Product, ProductCreate, ProductPatch};
use crate::media;
use crate::product_actor::ProductError;

/// Storefront catalog: categories and products, with the cross-resource
/// rules between them. Category deletion is refused while products still
/// reference it; product deletion cascades into cart rows and removes the
/// image file from the upload directory.
#[derive(Clone)]
pub struct CatalogClient {
    categories: ResourceClient<Category>,
    products: ResourceClient<Product>,
    cart: CartClient,
    upload_dir: PathBuf,
}

impl CatalogClient {
    pub fn new(
        categories: ResourceClient<Category>,
        products: ResourceClient<Product>,
        cart: CartClient,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            categories,
            products,
            cart,
            upload_dir,
        }
    }

    // -- Public browsing ------------------------------------------------------

    pub async fn list_categories(&self) -> Result<Vec<Category>, CategoryError> {
        let mut categories = self.categories.list().await?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    pub async fn get_category(&self, category_id: &str) -> Result<Option<Category>, CategoryError> {
        self.categories.get(category_id.to_string()).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        let mut products = self.products.list().await?;
        products.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(products)
    }

    pub async fn get_product(&self, product_id: &str) -> Result<Option<Product>, ProductError> {
        self.products.get(product_id.to_string()).await
    }

    pub async fn products_in_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Product>, CategoryError> {
        self.categories
            .get(category_id.to_string())
            .await?
            .ok_or_else(|| CategoryError::NotFound(category_id.to_string()))?;
        let mut products: Vec<_> = self
            .products
            .list()
            .await
            .map_err(|e| CategoryError::ActorCommunicationError(e.to_string()))?
            .into_iter()
            .filter(|p| p.category_id == category_id)
            .collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(products)
    }

    /// Case-insensitive substring search over product name, product
    /// description, and the name of the product's category. A blank query
    /// matches nothing.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ProductError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let categories = self
            .categories
            .list()
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;
        let mut hits: Vec<_> = self
            .products
            .list()
            .await?
            .into_iter()
            .filter(|p| {
                let category_match = categories
                    .iter()
                    .find(|c| c.id == p.category_id)
                    .map(|c| c.name.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || category_match
            })
            .collect();
        hits.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(hits)
    }

    // -- Category administration ----------------------------------------------

    pub async fn create_category(
        &self,
        identity: &Identity,
        params: CategoryCreate,
    ) -> Result<String, CategoryError> {
        require_admin(Some(identity))?;
        let id = self.categories.create(params).await?;
        info!(category_id = %id, "Category created");
        Ok(id)
    }

    pub async fn update_category(
        &self,
        identity: &Identity,
        category_id: &str,
        patch: CategoryPatch,
    ) -> Result<Category, CategoryError> {
        require_admin(Some(identity))?;
        self.categories.update(category_id.to_string(), patch).await
    }

    /// Delete a category. Refused while any product still references it.
    #[instrument(skip(self, identity))]
    pub async fn delete_category(
        &self,
        identity: &Identity,
        category_id: &str,
    ) -> Result<(), CategoryError> {
        require_admin(Some(identity))?;
        self.categories
            .get(category_id.to_string())
            .await?
            .ok_or_else(|| CategoryError::NotFound(category_id.to_string()))?;
        let in_use = self
            .products
            .list()
            .await
            .map_err(|e| CategoryError::ActorCommunicationError(e.to_string()))?
            .iter()
            .any(|p| p.category_id == category_id);
        if in_use {
            return Err(CategoryError::HasProducts);
        }
        self.categories.delete(category_id.to_string()).await?;
        info!(category_id = %category_id, "Category deleted");
        Ok(())
    }

    // -- Product administration -----------------------------------------------

    pub async fn create_product(
        &self,
        identity: &Identity,
        params: ProductCreate,
    ) -> Result<String, ProductError> {
        require_admin(Some(identity))?;
        self.require_category(&params.category_id).await?;
        if let Some(filename) = &params.image_filename {
            require_image_filename(filename)?;
        }
        let id = self.products.create(params).await?;
        info!(product_id = %id, "Product created");
        Ok(id)
    }

    /// Update a product. When the patch replaces or clears the image, the
    /// previous file is removed from the upload directory.
    pub async fn update_product(
        &self,
        identity: &Identity,
        product_id: &str,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        require_admin(Some(identity))?;
        if let Some(category_id) = &patch.category_id {
            self.require_category(category_id).await?;
        }
        if let Some(Some(filename)) = &patch.image_filename {
            require_image_filename(filename)?;
        }
        let old_image = match &patch.image_filename {
            Some(_) => self
                .products
                .get(product_id.to_string())
                .await?
                .and_then(|p| p.image_filename),
            None => None,
        };
        let updated = self.products.update(product_id.to_string(), patch).await?;
        if let Some(old) = old_image {
            if updated.image_filename.as_deref() != Some(old.as_str()) {
                media::delete_image(&self.upload_dir, &old);
            }
        }
        Ok(updated)
    }

    /// Delete a product, purge it from every cart, and remove its image file.
    #[instrument(skip(self, identity))]
    pub async fn delete_product(
        &self,
        identity: &Identity,
        product_id: &str,
    ) -> Result<(), ProductError> {
        require_admin(Some(identity))?;
        let product = self
            .products
            .get(product_id.to_string())
            .await?
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))?;
        self.products.delete(product_id.to_string()).await?;
        let purged = self
            .cart
            .purge_product(product_id)
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;
        if let Some(filename) = &product.image_filename {
            media::delete_image(&self.upload_dir, filename);
        }
        info!(product_id = %product_id, purged_cart_rows = purged, "Product deleted");
        Ok(())
    }

    async fn require_category(&self, category_id: &str) -> Result<(), ProductError> {
        let found = self
            .categories
            .get(category_id.to_string())
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;
        if found.is_none() {
            return Err(ProductError::ValidationError(format!(
                "unknown category: {category_id}"
            )));
        }
        Ok(())
    }
}

fn require_image_filename(filename: &str) -> Result<(), ProductError> {
    if !media::allowed_file(filename) {
        return Err(ProductError::ValidationError(format!(
            "unsupported image type: {filename}"
        )));
    }
    Ok(())
}
