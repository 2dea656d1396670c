// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CollectorSettings;
use crate::domain::models::job::CollectJob;
use crate::domain::services::listing_store::ListingStore;
use crate::workers::collect_worker::CollectWorker;
use crate::workers::generator::ListingGenerator;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// 任务 id 的时间格式，秒级粒度
const JOB_ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// 注册表错误类型
#[derive(Error, Debug)]
pub enum RegistryError {
    /// 任务不存在
    #[error("Job not found")]
    NotFound,
}

/// 采集任务注册表
///
/// 持有全部任务的规范状态：按任务 id 建立内存映射，
/// 负责创建任务并把它交给采集工作器异步执行，同时向
/// 并发的轮询方提供时点快照。每个任务槽位只有其所属
/// 工作器这一个写入方；外部取消请求是状态字段上唯一的
/// 外部写入，由工作器在下一次循环边界观察到。
pub struct JobRegistry {
    jobs: DashMap<String, Arc<RwLock<CollectJob>>>,
    /// 同一秒内并发创建时的消歧序号
    seq: AtomicU64,
    store: Arc<ListingStore>,
    generator: Arc<dyn ListingGenerator>,
    settings: CollectorSettings,
}

impl JobRegistry {
    /// 创建新的任务注册表实例
    ///
    /// # 参数
    ///
    /// * `store` - 商家数据存储服务
    /// * `generator` - 商家数据生成策略
    /// * `settings` - 采集器配置
    pub fn new(
        store: Arc<ListingStore>,
        generator: Arc<dyn ListingGenerator>,
        settings: CollectorSettings,
    ) -> Self {
        Self {
            jobs: DashMap::new(),
            seq: AtomicU64::new(1),
            store,
            generator,
            settings,
        }
    }

    /// 创建采集任务并立即交给工作器异步执行
    ///
    /// # 参数
    ///
    /// * `city` - 目标城市
    /// * `owner` - 发起者身份
    ///
    /// # 返回值
    ///
    /// 返回新任务的标识符
    pub fn create(&self, city: &str, owner: &str) -> String {
        self.create_with_total(city, owner, self.settings.default_total)
    }

    /// 创建指定计划条数的采集任务
    ///
    /// # 参数
    ///
    /// * `city` - 目标城市
    /// * `owner` - 发起者身份
    /// * `total` - 计划采集条数
    ///
    /// # 返回值
    ///
    /// 返回新任务的标识符
    pub fn create_with_total(&self, city: &str, owner: &str, total: u32) -> String {
        let (job_id, slot) = self.register(city, owner, total);

        info!("Collect job {} created for {} by {}", job_id, city, owner);

        let worker = CollectWorker::new(
            slot,
            self.store.clone(),
            self.generator.clone(),
            Duration::from_millis(self.settings.item_delay_ms),
        );
        tokio::spawn(async move {
            worker.run().await;
        });

        job_id
    }

    /// 获取任务的时点快照
    ///
    /// # 参数
    ///
    /// * `job_id` - 任务标识符
    ///
    /// # 返回值
    ///
    /// * `Ok(CollectJob)` - 任务可观察字段的不可变副本
    /// * `Err(RegistryError::NotFound)` - 任务不存在
    pub fn snapshot(&self, job_id: &str) -> Result<CollectJob, RegistryError> {
        self.jobs
            .get(job_id)
            .map(|slot| slot.read().clone())
            .ok_or(RegistryError::NotFound)
    }

    /// 请求取消任务
    ///
    /// 协作式取消：仅翻转状态，工作器在下一次循环边界
    /// 观察到后停止，不做强制中断
    ///
    /// # 参数
    ///
    /// * `job_id` - 任务标识符
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 任务原先在运行，现已标记取消
    /// * `Ok(false)` - 任务已处于终态，保持不变
    /// * `Err(RegistryError::NotFound)` - 任务不存在
    pub fn cancel(&self, job_id: &str) -> Result<bool, RegistryError> {
        let slot = self.jobs.get(job_id).ok_or(RegistryError::NotFound)?;
        let mut job = slot.write();
        let stopped = job.cancel().is_ok();
        if stopped {
            info!("Collect job {} cancellation requested", job_id);
        }
        Ok(stopped)
    }

    /// 分配任务 id 并注册槽位
    ///
    /// id 按秒级时间戳生成；同一秒内的并发创建通过
    /// entry 接口检测到冲突，并追加进程级序号消歧，
    /// 两次创建不可能拿到同一个 id。
    fn register(&self, city: &str, owner: &str, total: u32) -> (String, Arc<RwLock<CollectJob>>) {
        let base = Utc::now().format(JOB_ID_FORMAT).to_string();
        let mut candidate = base.clone();

        loop {
            match self.jobs.entry(candidate.clone()) {
                Entry::Vacant(entry) => {
                    let slot = Arc::new(RwLock::new(CollectJob::new(
                        candidate.clone(),
                        city,
                        owner,
                        total,
                    )));
                    entry.insert(slot.clone());
                    return (candidate, slot);
                }
                Entry::Occupied(_) => {
                    let n = self.seq.fetch_add(1, Ordering::Relaxed);
                    candidate = format!("{}-{}", base, n);
                }
            }
        }
    }
}
