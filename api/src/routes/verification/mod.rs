//! Email verification route handlers
//!
//! - `send_code` - issue a code and email it
//! - `verify_code` - check a submitted code
//! - `status` - whether an address is currently verified
//! - `reset` - forget an address's verification state

pub mod reset;
pub mod send_code;
pub mod status;
pub mod verify_code;

pub use reset::reset;
pub use send_code::send_code;
pub use status::status;
pub use verify_code::verify_code;
