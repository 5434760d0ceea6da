use uuid::Uuid;

/// The authenticated user a request acts on behalf of, resolved once by the
/// auth middleware and passed explicitly into the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}
