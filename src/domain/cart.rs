/// One line of a user's shopping cart. At most one row exists per
/// (user, product) pair; the cart actor's serialized upsert enforces this.
///
/// Rows are ephemeral: created on add-to-cart, deleted on checkout or
/// explicit removal. Prices are never stored here; subtotals are always
/// computed against the live product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
}
