pub mod emailjs;
pub mod sendgrid;
