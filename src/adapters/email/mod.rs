//! Email adapters.
//!
//! - `resend` - Resend transactional email and audience contacts
//! - `mock` - recording test doubles

mod mock;
mod resend;

pub use mock::{MockAudience, MockEmailSender};
pub use resend::{ResendAudience, ResendEmailSender};
