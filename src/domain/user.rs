/// A registered shopper, or an administrator when `is_admin` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Payload for registering a new user. The password arrives pre-hashed; the
/// hashing primitive lives behind [`crate::access::PasswordHasher`].
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

