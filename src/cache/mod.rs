//! 对象缓存
//!
//! 后端通过插件注册表按名称选择（`cache.type`），目前内置 moka 与 redis。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::{CollegeAdminError, Result};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端异常，调用方应回退到存储层
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明缓存插件，生成统一的构造入口 `register_plugin`
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub fn register_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::CollegeAdminError::cache_connection)?;
                        Ok::<Box<dyn $crate::cache::ObjectCache>, $crate::errors::CollegeAdminError>(
                            Box::new(cache),
                        )
                    })
                }),
            );
        }
    };
}

/// 注册内置缓存插件
pub fn register_builtin_caches() {
    object_cache::moka::register_plugin();
    object_cache::redis::register_plugin();
    register::debug_object_cache_registry();
}

/// 按配置创建缓存实例；redis 不可用时回退到 moka
pub async fn create_object_cache() -> Result<Arc<dyn ObjectCache>> {
    let config = AppConfig::get();
    let cache_type = config.cache.cache_type.as_str();

    let constructor = register::get_object_cache_plugin(cache_type).ok_or_else(|| {
        CollegeAdminError::cache_plugin_not_found(format!("未注册的缓存类型: {cache_type}"))
    })?;

    match constructor().await {
        Ok(cache) => {
            info!("对象缓存初始化完成: {}", cache_type);
            Ok(Arc::from(cache))
        }
        Err(e) if cache_type != "moka" => {
            warn!("缓存 {} 初始化失败，回退到 moka: {}", cache_type, e);
            let cache = object_cache::moka::MokaCacheWrapper::new()
                .map_err(CollegeAdminError::cache_connection)?;
            Ok(Arc::new(cache))
        }
        Err(e) => Err(e),
    }
}

/// 已认证用户的缓存键
pub fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}
