/**
 * Authentication Handler Types
 *
 * Request and response bodies of the account endpoints under `/users`.
 */

use serde::{Deserialize, Serialize};

use crate::shared::messaging::UserInfo;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub bio: String,
    pub email: String,
    /// Plain-text password (hashed before storage)
    pub password: String,
    #[serde(default)]
    pub avatar: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
///
/// `access_token` is the bearer token for REST calls and the `token` query
/// parameter for websocket channels.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

/// Plain acknowledgement
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
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

/// Profile of the authenticated user
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserInfoResponse {
    pub user: UserInfo,
}
