// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::config::settings::AuthSettings;

/// 认证状态
///
/// 静态凭据表：管理员与普通用户各持有一个访问密钥
#[derive(Clone)]
pub struct AuthState {
    /// 管理员访问密钥
    pub admin_key: String,
    /// 普通用户访问密钥
    pub user_key: String,
}

impl From<&AuthSettings> for AuthState {
    fn from(settings: &AuthSettings) -> Self {
        Self {
            admin_key: settings.admin_key.clone(),
            user_key: settings.user_key.clone(),
        }
    }
}

/// 已认证用户身份
///
/// 由认证中间件注入请求扩展，作为采集任务的发起者标识
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// 用户名
    pub name: String,
    /// 角色
    pub role: String,
}

/// 认证中间件
///
/// 验证请求中的静态访问密钥
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(StatusCode)` - 认证失败的状态码
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Allow public endpoints
    let path = req.uri().path();
    debug!("AuthMiddleware processing path: {}", path);
    if path == "/health" || path == "/v1/version" {
        return Ok(next.run(req).await);
    }

    let token = {
        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if !auth_header.starts_with("Bearer ") {
            return Err(StatusCode::UNAUTHORIZED);
        }

        auth_header[7..].to_string()
    };

    let user = if token == state.admin_key {
        AuthUser {
            name: "admin".to_string(),
            role: "admin".to_string(),
        }
    } else if token == state.user_key {
        AuthUser {
            name: "user".to_string(),
            role: "user".to_string(),
        }
    } else {
        warn!("Rejected request with unknown access key");
        return Err(StatusCode::UNAUTHORIZED);
    };

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
