pub mod app_error;
pub mod email_templates;
pub mod signup_form;
pub mod use_cases;
pub mod validators;
