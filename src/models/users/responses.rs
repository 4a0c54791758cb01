use super::entities::User;
use crate::models::common::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

pub type UserListResponse = PaginatedResponse<User>;
