// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::collect_request::StartCollectDto,
    presentation::{errors::AppError, middleware::auth_middleware::AuthUser},
    registry::JobRegistry,
};

/// 启动采集任务
///
/// 任务在返回前已注册并交给工作器异步执行，
/// 响应只携带用于后续轮询的任务 id
pub async fn start_collect(
    Extension(registry): Extension<Arc<JobRegistry>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<StartCollectDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let job_id = match payload.max_results {
        Some(total) => registry.create_with_total(&payload.city, &user.name, total),
        None => registry.create(&payload.city, &user.name),
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "job_id": job_id,
            "message": "采集任务已启动"
        })),
    ))
}

/// 查询采集任务状态
///
/// 返回任务可观察字段的时点快照；未知 id 映射为 404
pub async fn get_collect_status(
    Extension(registry): Extension<Arc<JobRegistry>>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let job = registry.snapshot(&job_id)?;
    Ok(Json(job))
}

/// 取消采集任务
///
/// 协作式取消：工作器在下一次循环边界观察到状态变化后停止
pub async fn cancel_collect(
    Extension(registry): Extension<Arc<JobRegistry>>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stopped = registry.cancel(&job_id)?;
    let message = if stopped {
        "任务已停止"
    } else {
        "任务已结束"
    };
    Ok(Json(json!({ "success": stopped, "message": message })))
}
