use serde::{Deserialize, Serialize};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SystemAdmin,  // 系统管理员
    CollegeAdmin, // 学院管理员
    Hod,          // 系主任
    Teacher,      // 教师
    Student,      // 学生
    Alumni,       // 校友
}

impl UserRole {
    pub const SYSTEM_ADMIN: &'static str = "system_admin";
    pub const COLLEGE_ADMIN: &'static str = "college_admin";
    pub const HOD: &'static str = "hod";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";
    pub const ALUMNI: &'static str = "alumni";

    pub fn system_admin_roles() -> &'static [&'static UserRole] {
        &[&Self::SystemAdmin]
    }
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::SystemAdmin, &Self::CollegeAdmin]
    }
    pub fn manager_roles() -> &'static [&'static UserRole] {
        &[&Self::SystemAdmin, &Self::CollegeAdmin, &Self::Hod]
    }
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[
            &Self::SystemAdmin,
            &Self::CollegeAdmin,
            &Self::Hod,
            &Self::Teacher,
        ]
    }
    pub fn academic_staff_roles() -> &'static [&'static UserRole] {
        &[&Self::CollegeAdmin, &Self::Hod, &Self::Teacher]
    }
    pub fn learner_roles() -> &'static [&'static UserRole] {
        &[&Self::Student, &Self::Alumni]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::SystemAdmin,
            &Self::CollegeAdmin,
            &Self::Hod,
            &Self::Teacher,
            &Self::Student,
            &Self::Alumni,
        ]
    }

    /// 角色管理权限表：当前角色能否创建、修改、删除目标角色的账号
    pub fn can_manage(&self, target: &UserRole) -> bool {
        use UserRole::*;
        matches!(
            (self, target),
            (SystemAdmin, CollegeAdmin)
                | (CollegeAdmin, Hod | Teacher | Student | Alumni)
                | (Hod, Teacher | Student)
        )
    }

    /// 是否绑定到某个学院
    pub fn is_college_bound(&self) -> bool {
        !matches!(self, UserRole::SystemAdmin)
    }

    /// 是否必须归属某个院系
    pub fn requires_department(&self) -> bool {
        matches!(
            self,
            UserRole::Hod | UserRole::Teacher | UserRole::Student | UserRole::Alumni
        )
    }

    /// 操作范围是否限于本院系
    pub fn is_department_scoped(&self) -> bool {
        matches!(self, UserRole::Hod | UserRole::Teacher)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user role: '{s}'. Supported roles: system_admin, college_admin, hod, teacher, student, alumni"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::SystemAdmin => UserRole::SYSTEM_ADMIN,
            UserRole::CollegeAdmin => UserRole::COLLEGE_ADMIN,
            UserRole::Hod => UserRole::HOD,
            UserRole::Teacher => UserRole::TEACHER,
            UserRole::Student => UserRole::STUDENT,
            UserRole::Alumni => UserRole::ALUMNI,
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::SYSTEM_ADMIN => Ok(UserRole::SystemAdmin),
            UserRole::COLLEGE_ADMIN => Ok(UserRole::CollegeAdmin),
            UserRole::HOD => Ok(UserRole::Hod),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::ALUMNI => Ok(UserRole::Alumni),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user status: '{s}'. Supported: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub display_name: Option<String>,
    pub college_id: Option<i64>,
    pub department_id: Option<i64>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("Failed to generate token pair: {e}"))
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_strings() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(&parsed, *role);
        }
        assert!("principal".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_error_message() {
        let err = serde_json::from_str::<UserRole>(r#""dean""#).unwrap_err();
        assert!(err.to_string().contains("Invalid user role"));
    }

    #[test]
    fn test_can_manage_table() {
        use UserRole::*;
        assert!(SystemAdmin.can_manage(&CollegeAdmin));
        assert!(!SystemAdmin.can_manage(&Student));
        assert!(CollegeAdmin.can_manage(&Hod));
        assert!(CollegeAdmin.can_manage(&Alumni));
        assert!(!CollegeAdmin.can_manage(&CollegeAdmin));
        assert!(Hod.can_manage(&Teacher));
        assert!(Hod.can_manage(&Student));
        assert!(!Hod.can_manage(&Hod));
        assert!(!Teacher.can_manage(&Student));
        assert!(!Student.can_manage(&Student));
        assert!(!Alumni.can_manage(&Alumni));
    }

    #[test]
    fn test_role_scoping() {
        assert!(!UserRole::SystemAdmin.is_college_bound());
        assert!(UserRole::CollegeAdmin.is_college_bound());
        assert!(!UserRole::CollegeAdmin.requires_department());
        assert!(UserRole::Student.requires_department());
        assert!(UserRole::Teacher.is_department_scoped());
        assert!(!UserRole::Student.is_department_scoped());
    }
}
