//! Domain entities - the core business objects.

mod caller;
mod form;
mod key;
mod post;
pub mod slug;
mod user;

pub use caller::{Caller, STAFF_ROLE, SUPERUSER_ROLE};
pub use form::{FieldErrors, NewPost, PostChanges, PostFields, TITLE_MAX_CHARS};
pub use key::PostKey;
pub use post::{Post, PostRecord};
pub use user::User;
