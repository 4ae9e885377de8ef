use uuid::Uuid;

use crate::engine::{SecureRandom, draw_many};
use crate::error::{AppError, AppResult};
use crate::models::{DrawRequest, DrawResponse, DrawResultItem, DrawSummaryItem, WonProduct};
use crate::store::{NewDrawRecord, SharedStore};

#[derive(Clone)]
pub struct DrawService {
    store: SharedStore,
    max_batch_size: u32,
}

impl DrawService {
    pub fn new(store: SharedStore, max_batch_size: u32) -> Self {
        Self {
            store,
            max_batch_size,
        }
    }

    /// 抽奖
    ///
    /// 逻辑:
    /// 1. 校验次数 (1 ~ max_batch_size) 与活动状态
    /// 2. 加锁后读取活动奖品的库存快照
    /// 3. 在快照上连续抽奖 (每次中奖后扣减副本库存)
    /// 4. 按中奖结果扣减存储中的库存 (最低为0), 每次抽奖写一条记录
    /// 5. 返回结果、按奖品汇总与最新库存
    pub async fn draw(&self, req: &DrawRequest) -> AppResult<DrawResponse> {
        if req.quantity < 1 || req.quantity > self.max_batch_size as i64 {
            return Err(AppError::ValidationError(format!(
                "Quantity must be between 1 and {}",
                self.max_batch_size
            )));
        }
        let quantity = req.quantity as u32;

        let mut store = self.store.lock().await;

        let event = store
            .find_event(req.event_id)
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", req.event_id)))?;
        if !event.is_active {
            return Err(AppError::ValidationError("Event is not active".into()));
        }

        let pool = store.prize_pool(req.event_id)?;
        let outcomes = draw_many(&pool, quantity as usize, &mut SecureRandom);

        let batch_id = Uuid::new_v4();
        let mut results = Vec::with_capacity(outcomes.len());
        let mut summary: Vec<DrawSummaryItem> = Vec::new();

        for outcome in &outcomes {
            let won = outcome.product_id().and_then(|id| {
                store.decrement_stock(id)?;
                store.find_product(id).map(WonProduct::from)
            });

            store.insert_record(NewDrawRecord {
                event_id: req.event_id,
                batch_id,
                product_id: won.as_ref().map(|p| p.id),
                product_name: won.as_ref().map(|p| p.name.clone()),
                is_win: won.is_some(),
                seed: outcome.seed.clone(),
            });

            if let Some(product) = &won {
                match summary.iter_mut().find(|s| s.product.id == product.id) {
                    Some(entry) => entry.count += 1,
                    None => summary.push(DrawSummaryItem {
                        count: 1,
                        product: product.clone(),
                    }),
                }
            }

            results.push(DrawResultItem {
                is_win: won.is_some(),
                product: won,
            });
        }

        let wins = results.iter().filter(|r| r.is_win).count();
        log::info!(
            "Draw batch {batch_id} for event {}: {wins}/{quantity} wins",
            req.event_id
        );

        Ok(DrawResponse {
            batch_id,
            quantity,
            results,
            summary,
            updated_products: store.products_by_event(req.event_id),
        })
    }
}
