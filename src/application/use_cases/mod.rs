pub mod diagnostics;
pub mod waitlist;
pub mod welcome_email;
