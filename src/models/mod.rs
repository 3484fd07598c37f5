mod user;
pub use user::{PublicUser, User};

mod claims;
pub use claims::{AuthUser, Claims};

mod snippet;
pub use snippet::{Language, Snippet, DESCRIPTION_MAX, TAG_MAX, TITLE_MAX};
