pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use cart::*;
pub use category::*;
pub use order::*;
pub use product::*;
pub use user::*;
