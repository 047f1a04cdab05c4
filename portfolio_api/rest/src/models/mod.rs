use serde::Serialize;

pub mod contact;
pub mod health;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiSubmissionError {
    pub success: bool,
    pub error: String,
}
