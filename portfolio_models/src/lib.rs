mod macros;

pub mod auth;
pub mod contact;
pub mod environment;
pub mod pagination;
