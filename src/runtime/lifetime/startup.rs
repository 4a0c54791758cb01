use crate::cache::{ObjectCache, create_object_cache, register_builtin_caches};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 初始化系统管理员账号
/// 数据库中没有任何用户时创建 `sysadmin`
async fn seed_system_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users(None, None, None).await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping system admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating system admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping system admin seed", e);
            return;
        }
    }

    // 优先使用环境变量中的密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        // 随机串后缀保证满足密码规则
        let pwd = format!("{}Aa9#", generate_random_code(16));
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated sysadmin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        username: "sysadmin".to_string(),
        email: "sysadmin@localhost".to_string(),
        password: password_hash,
        role: UserRole::SystemAdmin,
        display_name: Some("System Administrator".to_string()),
        college_id: None,
        department_id: None,
    };

    match storage.create_user(admin_request).await {
        Ok(user) => info!(
            "System admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create system admin account: {}", e),
    }
}

/// 准备服务器启动的上下文：存储、迁移、初始账号和缓存
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    register_builtin_caches();

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_system_admin(&storage).await;

    let cache = create_object_cache()
        .await
        .expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
