/// User administration services
///
/// # Modules
///
/// - [`update_user`]: Validate, replace queues, update fields, reload
/// - [`show_user`]: Load a user with its queues
/// - [`store`]: The [`store::UserStore`] seam and its PostgreSQL implementation
/// - [`memory`]: In-memory store for tests and demos
/// - [`error`]: [`error::UserServiceError`] and field-level validation details
/// - [`view`]: The flattened [`view::UserView`] returned to callers

pub mod error;
pub mod memory;
pub mod show_user;
pub mod store;
pub mod update_user;
pub mod view;

pub use error::{FieldError, UserServiceError};
pub use store::{PgUserStore, StoreError, UserStore};
pub use view::UserView;
