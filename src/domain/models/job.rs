// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 采集任务实体
///
/// 表示一次后台采集作业的完整状态，包含目标城市、
/// 发起者、执行进度与终态信息。任务状态只会向前推进：
/// Running → Completed/Failed/Cancelled，终态不可再变更。
/// 任务仅存在于内存中，进程重启后丢失，采集到的
/// 商家数据则持久化保留。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectJob {
    /// 任务唯一标识符，创建时按时间生成
    pub id: String,
    /// 目标城市
    pub city: String,
    /// 发起者身份
    pub owner: String,
    /// 任务状态
    pub status: JobStatus,
    /// 执行进度，0-100 的整数，运行期间单调不减
    pub progress: i32,
    /// 计划采集条数
    pub total: u32,
    /// 成功入库条数，不超过 total
    pub success_count: u32,
    /// 状态描述信息
    pub message: String,
    /// 任务启动时间
    pub started_at: DateTime<Utc>,
    /// 最近一次状态更新时间
    pub updated_at: DateTime<Utc>,
}

/// 任务状态枚举
///
/// 状态转换遵循以下流程：
/// Running → Completed/Failed/Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// 运行中，任务正在采集
    #[default]
    Running,
    /// 已完成，采集循环正常走完
    Completed,
    /// 已失败，采集控制逻辑出现异常
    Failed,
    /// 已取消，外部请求停止且被运行器观察到
    Cancelled,
}

impl JobStatus {
    /// 判断是否为终态
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            "cancelled" => Ok(JobStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 无效的状态转换，终态任务不允许再变更
    #[error("Invalid state transition")]
    InvalidStateTransition,
}

impl CollectJob {
    /// 创建一个新的采集任务
    ///
    /// # 参数
    ///
    /// * `id` - 任务标识符
    /// * `city` - 目标城市
    /// * `owner` - 发起者身份
    /// * `total` - 计划采集条数
    ///
    /// # 返回值
    ///
    /// 返回处于 Running 状态、进度为 0 的任务实例
    pub fn new(id: String, city: &str, owner: &str, total: u32) -> Self {
        let now = Utc::now();
        Self {
            id,
            city: city.to_string(),
            owner: owner.to_string(),
            status: JobStatus::Running,
            progress: 0,
            total,
            success_count: 0,
            message: format!("正在采集{}的数据...", city),
            started_at: now,
            updated_at: now,
        }
    }

    /// 判断任务是否仍在运行
    pub fn is_running(&self) -> bool {
        self.status == JobStatus::Running
    }

    /// 刷新更新时间
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// 完成任务
    ///
    /// 将任务状态从 Running 变更为 Completed，进度固定为 100
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 转换成功
    /// * `Err(DomainError)` - 任务已处于终态
    pub fn complete(&mut self) -> Result<(), DomainError> {
        match self.status {
            JobStatus::Running => {
                self.status = JobStatus::Completed;
                self.progress = 100;
                self.message = format!("采集完成！共收集{}条数据", self.success_count);
                self.touch();
                Ok(())
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 标记任务失败
    ///
    /// # 参数
    ///
    /// * `reason` - 失败原因，写入状态描述
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 转换成功
    /// * `Err(DomainError)` - 任务已处于终态
    pub fn fail(&mut self, reason: &str) -> Result<(), DomainError> {
        match self.status {
            JobStatus::Running => {
                self.status = JobStatus::Failed;
                self.message = format!("采集失败: {}", reason);
                self.touch();
                Ok(())
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 取消任务
    ///
    /// 协作式取消：仅翻转状态标志，由运行器在下一次
    /// 循环边界观察到后停止推进
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 转换成功
    /// * `Err(DomainError)` - 任务已处于终态
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        match self.status {
            JobStatus::Running => {
                self.status = JobStatus::Cancelled;
                self.message = "任务已取消".to_string();
                self.touch();
                Ok(())
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }
}
