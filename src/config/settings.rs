// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、服务器、认证和采集器等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 认证配置
    pub auth: AuthSettings,
    /// 采集器配置
    pub collector: CollectorSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 认证配置设置
///
/// 静态凭据表，对应管理员与普通用户两种身份
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// 管理员访问密钥
    pub admin_key: String,
    /// 普通用户访问密钥
    pub user_key: String,
}

/// 采集器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorSettings {
    /// 每个任务默认计划采集的条数
    pub default_total: u32,
    /// 每条数据之间的间隔毫秒数，维持轮询端可见的渐进进度
    pub item_delay_ms: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Default DB pool settings
            .set_default("database.url", "sqlite://data/collectrs.db?mode=rwc")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default auth credentials, meant to be overridden per environment
            .set_default("auth.admin_key", "admin-dev-key")?
            .set_default("auth.user_key", "user-dev-key")?
            // Default collector settings
            .set_default("collector.default_total", 50)?
            .set_default("collector.item_delay_ms", 50)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("COLLECTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
