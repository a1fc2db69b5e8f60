//! Session domain - who is signed in, and how that travels in a cookie.

mod codec;
mod errors;
mod session;

pub use codec::{SessionCodec, SESSION_TTL_DAYS};
pub use errors::SessionError;
pub use session::{Role, Session};
