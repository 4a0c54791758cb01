pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};
use crate::services::access::{Access, forbidden, internal_error, not_found};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 读取目标用户并检查是否在操作者的管辖范围内
    pub(crate) async fn load_visible(
        &self,
        request: &HttpRequest,
        actor: &User,
        user_id: i64,
    ) -> Access<User> {
        let target = match self.get_storage(request).get_user_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(not_found(ErrorCode::UserNotFound, "User not found")),
            Err(e) => return Err(internal_error("Failed to get user", e)),
        };
        if !is_visible(actor, &target) {
            return Err(forbidden("User is outside of your scope"));
        }
        Ok(target)
    }

    /// 在可见的基础上还要求角色可管理
    pub(crate) async fn load_manageable(
        &self,
        request: &HttpRequest,
        actor: &User,
        user_id: i64,
    ) -> Access<User> {
        let target = self.load_visible(request, actor, user_id).await?;
        if !actor.role.can_manage(&target.role) {
            return Err(forbidden(format!(
                "Role {} cannot manage {} accounts",
                actor.role, target.role
            )));
        }
        Ok(target)
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }
}

/// 系统管理员可见全部；学院管理员可见本学院；系主任可见本院系
fn is_visible(actor: &User, target: &User) -> bool {
    match actor.role {
        UserRole::SystemAdmin => true,
        UserRole::CollegeAdmin => actor.college_id.is_some() && target.college_id == actor.college_id,
        UserRole::Hod => {
            actor.college_id.is_some()
                && target.college_id == actor.college_id
                && target.department_id == actor.department_id
        }
        _ => actor.id == target.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user(id: i64, role: UserRole, college_id: Option<i64>, department_id: Option<i64>) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            college_id,
            department_id,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_visibility() {
        let admin = user(1, UserRole::SystemAdmin, None, None);
        let college_admin = user(2, UserRole::CollegeAdmin, Some(1), None);
        let hod = user(3, UserRole::Hod, Some(1), Some(10));
        let teacher = user(4, UserRole::Teacher, Some(1), Some(10));
        let other_teacher = user(5, UserRole::Teacher, Some(1), Some(11));
        let foreign = user(6, UserRole::Teacher, Some(2), Some(20));

        assert!(is_visible(&admin, &foreign));
        assert!(is_visible(&college_admin, &other_teacher));
        assert!(!is_visible(&college_admin, &foreign));
        assert!(is_visible(&hod, &teacher));
        assert!(!is_visible(&hod, &other_teacher));
        assert!(!is_visible(&teacher, &hod));
        assert!(is_visible(&teacher, &teacher));
    }
}
