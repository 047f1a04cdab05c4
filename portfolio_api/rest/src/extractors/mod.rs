pub mod admin_key;
pub mod contact_body;
