pub mod change_event;
pub mod email_provider;
pub mod exam;
pub mod signup_variant;
pub mod waitlist_entry;
