//! JSON API response DTOs

use serde::Serialize;

use crate::{
    models::{Accolade, Member},
    services::auth_service::TokenPair,
};

/// Login response: tokens plus the signed-in member
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: Member,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Accolades held by the caller
#[derive(Debug, Serialize)]
pub struct AccoladesResponse {
    pub accolades: Vec<Accolade>,
}
