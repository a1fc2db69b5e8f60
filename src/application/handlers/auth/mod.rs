//! Sign-in handlers.
//!
//! - Begin: state + authorization URL
//! - Complete: callback checks, code exchange, user upsert

mod begin_sign_in;
mod complete_sign_in;

pub use begin_sign_in::{BeginSignInCommand, BeginSignInHandler, BeginSignInResult};
pub use complete_sign_in::{CompleteSignInCommand, CompleteSignInHandler, CompleteSignInResult};
