/// A catalog item. `image_filename` points into the upload directory; the
/// file itself is managed by [`crate::media`].
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_filename: Option<String>,
    pub category_id: String,
}

#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_filename: Option<String>,
    pub category_id: String,
}

/// Partial update. `image_filename` is doubly optional: `None` leaves the
/// image untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_filename: Option<Option<String>>,
    pub category_id: Option<String>,
}
