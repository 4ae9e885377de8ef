use crate::engine::{
    DEFAULT_WEIGHT, DrawStatistics, PoolValidation, PrizeItem, PrizePool, SecureRandom,
    compute_statistics, simulate_distribution, validate_pool,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProductRequest, DrawResultsResponse, DrawResultsStats, Event, Product,
    SimulationResponse, StockAdjustRequest, StockAdjustResponse,
};
use crate::store::{MemoryStore, NewProduct, SharedStore};

const DEFAULT_RESULTS_LIMIT: u32 = 100;
const MAX_SIMULATION_ITERATIONS: u32 = 1_000_000;

#[derive(Clone)]
pub struct EventService {
    store: SharedStore,
    simulation_iterations: u32,
}

impl EventService {
    pub fn new(store: SharedStore, simulation_iterations: u32) -> Self {
        Self {
            store,
            simulation_iterations,
        }
    }

    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        Ok(self.store.lock().await.events().to_vec())
    }

    pub async fn get_event(&self, event_id: i64) -> AppResult<Event> {
        let store = self.store.lock().await;
        let event = ensure_event(&store, event_id)?.clone();
        Ok(event)
    }

    /// 获取活动奖品 (按展示顺序)
    pub async fn list_products(&self, event_id: i64) -> AppResult<Vec<Product>> {
        let store = self.store.lock().await;
        ensure_event(&store, event_id)?;
        Ok(store.products_by_event(event_id))
    }

    /// 新增奖品, 剩余库存等于总库存
    pub async fn create_product(
        &self,
        event_id: i64,
        req: &CreateProductRequest,
    ) -> AppResult<Product> {
        if req.name.trim().is_empty() {
            return Err(AppError::ValidationError("Product name is required".into()));
        }
        if req.total_quantity < 0 {
            return Err(AppError::ValidationError(
                "Total quantity must not be negative".into(),
            ));
        }
        let total_quantity = u32::try_from(req.total_quantity)
            .map_err(|_| AppError::ValidationError("Total quantity is too large".into()))?;
        let weight = req
            .weight
            .as_ref()
            .map(|w| w.resolve())
            .unwrap_or(DEFAULT_WEIGHT);
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AppError::ValidationError(
                "Weight must be greater than 0".into(),
            ));
        }

        let mut store = self.store.lock().await;
        ensure_event(&store, event_id)?;
        // 加入后奖池须仍然有效 (ID 0 不会被分配)
        let mut candidate = store.prize_pool(event_id)?.to_vec();
        candidate.push(PrizeItem::new(0, req.name.trim(), total_quantity, weight));
        PrizePool::new(candidate).map_err(|e| AppError::ValidationError(e.to_string()))?;

        let product = store.insert_product(NewProduct {
            event_id,
            name: req.name.trim().to_string(),
            description: req.description.clone(),
            image_url: req.image_url.clone(),
            weight,
            total_quantity,
            remaining_quantity: total_quantity,
            display_order: req.display_order.unwrap_or(0),
        });
        log::info!("Created product {} for event {event_id}", product.id);
        Ok(product)
    }

    /// 调整库存, 结果限制在 [0, total_quantity]
    pub async fn adjust_stock(
        &self,
        product_id: i64,
        req: &StockAdjustRequest,
    ) -> AppResult<StockAdjustResponse> {
        let mut store = self.store.lock().await;
        let product = store
            .find_product_mut(product_id)
            .ok_or_else(|| AppError::NotFound(format!("Product {product_id} not found")))?;

        let target = match (req.remaining_quantity, req.adjustment) {
            (Some(absolute), _) => absolute,
            (None, Some(delta)) => i64::from(product.remaining_quantity).saturating_add(delta),
            (None, None) => {
                return Err(AppError::ValidationError(
                    "remaining_quantity or adjustment is required".into(),
                ));
            }
        };
        let clamped = target.clamp(0, i64::from(product.total_quantity)) as u32;

        log::info!(
            "Stock of product {product_id} adjusted: {} -> {clamped}",
            product.remaining_quantity
        );
        product.remaining_quantity = clamped;

        Ok(StockAdjustResponse {
            product_id,
            remaining_quantity: clamped,
        })
    }

    /// 抽奖记录 (最新在前) 及统计
    pub async fn list_results(
        &self,
        event_id: i64,
        limit: Option<u32>,
    ) -> AppResult<DrawResultsResponse> {
        let store = self.store.lock().await;
        ensure_event(&store, event_id)?;
        let limit = limit.unwrap_or(DEFAULT_RESULTS_LIMIT) as usize;
        let results = store.records_by_event(event_id, limit);
        let stats = DrawResultsStats::from_records(&results);
        Ok(DrawResultsResponse { results, stats })
    }

    pub async fn statistics(&self, event_id: i64) -> AppResult<DrawStatistics> {
        let store = self.store.lock().await;
        ensure_event(&store, event_id)?;
        let pool = store.prize_pool(event_id)?;
        Ok(compute_statistics(&pool))
    }

    pub async fn validate(&self, event_id: i64) -> AppResult<PoolValidation> {
        let store = self.store.lock().await;
        ensure_event(&store, event_id)?;
        let pool = store.prize_pool(event_id)?;
        Ok(validate_pool(&pool))
    }

    /// 分布模拟, 在锁外执行
    pub async fn simulate(
        &self,
        event_id: i64,
        iterations: Option<u32>,
    ) -> AppResult<SimulationResponse> {
        let iterations = iterations
            .unwrap_or(self.simulation_iterations)
            .min(MAX_SIMULATION_ITERATIONS);

        let pool = {
            let store = self.store.lock().await;
            ensure_event(&store, event_id)?;
            store.prize_pool(event_id)?
        };

        let distribution = tokio::task::spawn_blocking(move || {
            simulate_distribution(&pool, iterations, &mut SecureRandom)
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Simulation task failed: {e}")))?;

        Ok(SimulationResponse {
            iterations,
            distribution,
        })
    }
}

fn ensure_event(store: &MemoryStore, event_id: i64) -> AppResult<&Event> {
    store
        .find_event(event_id)
        .ok_or_else(|| AppError::NotFound(format!("Event {event_id} not found")))
}
