// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::CollectJob;
use crate::domain::services::listing_store::ListingStore;
use crate::workers::generator::ListingGenerator;
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};
use uuid::Uuid;

/// 采集工作器
///
/// 每个任务对应一个工作器实例，在独立的 tokio 任务上
/// 运行一次。工作器是任务槽位的唯一写入方；外部只通过
/// 注册表读取快照，或请求协作式取消。
pub struct CollectWorker {
    /// 任务槽位，生命周期内仅由本工作器推进
    job: Arc<RwLock<CollectJob>>,
    store: Arc<ListingStore>,
    generator: Arc<dyn ListingGenerator>,
    item_delay: Duration,
    worker_id: Uuid,
}

impl CollectWorker {
    /// 创建新的采集工作器实例
    pub fn new(
        job: Arc<RwLock<CollectJob>>,
        store: Arc<ListingStore>,
        generator: Arc<dyn ListingGenerator>,
        item_delay: Duration,
    ) -> Self {
        Self {
            job,
            store,
            generator,
            item_delay,
            worker_id: Uuid::new_v4(),
        }
    }

    /// 运行采集工作器
    ///
    /// 正常走完采集循环且未被取消时任务进入 Completed；
    /// 循环控制逻辑出现异常时任务进入 Failed。单条数据
    /// 入库失败不会终止任务，只会少计一次成功数。
    pub async fn run(self) {
        let (job_id, city, total) = {
            let job = self.job.read();
            (job.id.clone(), job.city.clone(), job.total)
        };

        info!(
            "Collect worker {} started for job {} ({})",
            self.worker_id, job_id, city
        );

        match self.collect(&job_id, &city, total).await {
            Ok(true) => {
                let mut job = self.job.write();
                if job.is_running() && job.complete().is_ok() {
                    info!(
                        "Collect job {} completed with {}/{} listings saved",
                        job_id, job.success_count, total
                    );
                }
            }
            Ok(false) => {
                info!("Collect job {} stopped by cancellation", job_id);
            }
            Err(e) => {
                error!("Collect job {} failed: {}", job_id, e);
                let mut job = self.job.write();
                if job.is_running() {
                    let _ = job.fail(&e.to_string());
                }
            }
        }
    }

    /// 采集循环
    ///
    /// # 返回值
    ///
    /// * `Ok(true)` - 循环正常走完
    /// * `Ok(false)` - 在循环边界观察到外部取消
    /// * `Err(_)` - 循环控制逻辑出现异常
    async fn collect(&self, job_id: &str, city: &str, total: u32) -> Result<bool> {
        for index in 0..total {
            // 协作式取消检查点：当前条目处理完后才会再次到达这里
            if !self.job.read().is_running() {
                return Ok(false);
            }

            let listing = self.generator.generate(city, job_id, index)?;
            let saved = self.store.upsert(&listing).await;

            {
                let mut job = self.job.write();
                if saved {
                    job.success_count += 1;
                }
                job.progress = ((index + 1) * 100 / total) as i32;
                job.touch();
            }

            sleep(self.item_delay).await;
        }

        Ok(true)
    }
}
