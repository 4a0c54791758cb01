//! 学生存储操作
//!
//! 学生由一条用户记录（登录账号）和一条学籍记录组成，读取时合并为 `StudentDetail`。

use std::collections::HashMap;

use super::{SeaOrmStorage, page_and_size};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model as StudentModel};
use crate::entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as Users, Model as UserModel,
};
use crate::errors::{CollegeAdminError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::{StudentDetail, StudentStatus},
        requests::{NewStudent, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::entities::{UserRole, UserStatus},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

fn merge_detail(student: StudentModel, user: UserModel) -> StudentDetail {
    StudentDetail {
        student: student.into_student(),
        username: user.username,
        email: user.email,
        display_name: user.display_name,
    }
}

impl SeaOrmStorage {
    /// 创建学生：账号和学籍在同一事务中写入
    pub async fn create_student_impl(&self, req: NewStudent) -> Result<StudentDetail> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let user = UserActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            role: Set(UserRole::Student.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            college_id: Set(Some(req.college_id)),
            department_id: Set(Some(req.department_id)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| CollegeAdminError::from_db_write("创建学生账号失败", e))?;

        let student = ActiveModel {
            user_id: Set(user.id),
            college_id: Set(req.college_id),
            department_id: Set(req.department_id),
            batch_id: Set(req.batch_id),
            roll_number: Set(req.roll_number),
            status: Set(StudentStatus::Enrolled.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| CollegeAdminError::from_db_write("创建学籍失败", e))?;

        txn.commit()
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(merge_detail(student, user))
    }

    /// 查询学籍并补全账号信息
    async fn find_student_detail(&self, condition: Condition) -> Result<Option<StudentDetail>> {
        let result = Students::find()
            .filter(condition)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(match result {
            Some((student, Some(user))) => Some(merge_detail(student, user)),
            _ => None,
        })
    }

    /// 通过学籍 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<StudentDetail>> {
        self.find_student_detail(Condition::all().add(Column::Id.eq(id)))
            .await
    }

    /// 通过账号 ID 获取学生
    pub async fn get_student_by_user_id_impl(
        &self,
        user_id: i64,
    ) -> Result<Option<StudentDetail>> {
        self.find_student_detail(Condition::all().add(Column::UserId.eq(user_id)))
            .await
    }

    /// 学院内按学号获取学生
    pub async fn get_student_by_roll_number_impl(
        &self,
        college_id: i64,
        roll_number: &str,
    ) -> Result<Option<StudentDetail>> {
        self.find_student_detail(
            Condition::all()
                .add(Column::CollegeId.eq(college_id))
                .add(Column::RollNumber.eq(roll_number)),
        )
        .await
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = page_and_size(query.page, query.size);

        let mut select = Students::find();

        if let Some(college_id) = query.college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        if let Some(batch_id) = query.batch_id {
            select = select.filter(Column::BatchId.eq(batch_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 按学号或账号信息搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            let matched_users: Vec<i64> = Users::find()
                .select_only()
                .column(UserColumn::Id)
                .filter(
                    Condition::any()
                        .add(UserColumn::Username.contains(&escaped))
                        .add(UserColumn::Email.contains(&escaped))
                        .add(UserColumn::DisplayName.contains(&escaped)),
                )
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| {
                    CollegeAdminError::database_operation(format!("搜索学生账号失败: {e}"))
                })?;

            select = select.filter(
                Condition::any()
                    .add(Column::RollNumber.contains(&escaped))
                    .add(Column::UserId.is_in(matched_users)),
            );
        }

        select = select.order_by_asc(Column::RollNumber);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询学生总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询学生页数失败: {e}"))
        })?;

        let students = paginator.fetch_page(page - 1).await.map_err(|e| {
            CollegeAdminError::database_operation(format!("查询学生列表失败: {e}"))
        })?;

        // 批量查询账号信息
        let user_ids: Vec<i64> = students.iter().map(|s| s.user_id).collect();
        let users = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询学生账号失败: {e}")))?;
        let mut user_map: HashMap<i64, UserModel> = users.into_iter().map(|u| (u.id, u)).collect();

        let items = students
            .into_iter()
            .filter_map(|s| {
                let user = user_map.remove(&s.user_id)?;
                Some(merge_detail(s, user))
            })
            .collect();

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学生信息（账号字段与学籍字段在同一事务中更新）
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentDetail>> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let user_id = existing.user_id;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("开启事务失败: {e}")))?;

        let mut student: ActiveModel = existing.into();
        student.updated_at = Set(now);
        if let Some(batch_id) = update.batch_id {
            student.batch_id = Set(Some(batch_id));
        }
        if let Some(roll_number) = update.roll_number {
            student.roll_number = Set(roll_number);
        }
        if let Some(status) = update.status {
            student.status = Set(status.to_string());
        }
        student
            .update(&txn)
            .await
            .map_err(|e| CollegeAdminError::from_db_write("更新学籍失败", e))?;

        if update.email.is_some() || update.display_name.is_some() {
            let mut user = UserActiveModel {
                id: Set(user_id),
                updated_at: Set(now),
                ..Default::default()
            };
            if let Some(email) = update.email {
                user.email = Set(email);
            }
            if let Some(display_name) = update.display_name {
                user.display_name = Set(Some(display_name));
            }
            user.update(&txn)
                .await
                .map_err(|e| CollegeAdminError::from_db_write("更新学生账号失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_student_by_id_impl(id).await
    }

    /// 删除学生：删除账号，学籍和成绩随外键级联删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(false);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("开启事务失败: {e}")))?;

        Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("删除学籍失败: {e}")))?;

        Users::delete_by_id(existing.user_id)
            .exec(&txn)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("删除学生账号失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }

    /// 统计学生数量
    pub async fn count_students_impl(
        &self,
        college_id: Option<i64>,
        department_id: Option<i64>,
    ) -> Result<u64> {
        let mut select = Students::find();
        if let Some(college_id) = college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }
        if let Some(department_id) = department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }

        select
            .count(&self.db)
            .await
            .map_err(|e| CollegeAdminError::database_operation(format!("统计学生数量失败: {e}")))
    }
}
