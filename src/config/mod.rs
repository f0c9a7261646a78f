//! Runtime settings read from the environment (and `.env` in development),
//! plus the fixed limits and defaults the rest of the crate shares.

mod constants;
mod settings;

pub use constants::*;
pub use settings::{CloudinarySettings, Config, IdentitySettings, RazorpaySettings};
