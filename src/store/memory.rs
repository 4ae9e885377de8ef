use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::EventSeed;
use crate::engine::{PoolError, PrizePool, checked_quantity};
use crate::models::{DrawRecord, Event, Product};

/// 所有服务共享同一把锁: 抽奖时的库存快照与扣减不会与其他请求交错
pub type SharedStore = Arc<Mutex<MemoryStore>>;

/// 新增奖品 (ID 与时间由存储分配)
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub event_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub weight: f64,
    pub total_quantity: u32,
    pub remaining_quantity: u32,
    pub display_order: i32,
}

#[derive(Debug, Clone)]
pub struct NewDrawRecord {
    pub event_id: i64,
    pub batch_id: Uuid,
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub is_win: bool,
    pub seed: Option<String>,
}

/// 内存存储 (活动 / 奖品 / 抽奖记录), 进程重启后丢失
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Vec<Event>,
    products: Vec<Product>,
    records: Vec<DrawRecord>,
    next_event_id: i64,
    next_product_id: i64,
    next_record_id: i64,
}

pub fn create_store(seeds: &[EventSeed]) -> Result<SharedStore, PoolError> {
    let store = MemoryStore::from_seeds(seeds)?;
    log::info!(
        "Loaded {} events and {} products into memory store",
        store.events.len(),
        store.products.len()
    );
    Ok(Arc::new(Mutex::new(store)))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置载入, 每个活动的奖品需满足奖池约定
    pub fn from_seeds(seeds: &[EventSeed]) -> Result<Self, PoolError> {
        let mut store = Self::new();
        for seed in seeds {
            let event = store.insert_event(&seed.name, seed.description.clone(), seed.is_active);
            for product in &seed.products {
                let provisional_id = store.next_product_id + 1;
                let total = checked_quantity(provisional_id, "total_quantity", product.total_quantity)?;
                let remaining = match product.remaining_quantity {
                    Some(r) => checked_quantity(provisional_id, "remaining_quantity", r)?,
                    None => total,
                };
                store.insert_product(NewProduct {
                    event_id: event.id,
                    name: product.name.clone(),
                    description: product.description.clone(),
                    image_url: product.image_url.clone(),
                    weight: product.weight.resolve(),
                    total_quantity: total,
                    remaining_quantity: remaining,
                    display_order: product.display_order,
                });
            }
            store.prize_pool(event.id)?;
        }
        Ok(store)
    }

    pub fn insert_event(&mut self, name: &str, description: Option<String>, is_active: bool) -> Event {
        self.next_event_id += 1;
        let event = Event {
            id: self.next_event_id,
            name: name.to_string(),
            description,
            is_active,
            created_at: Utc::now(),
        };
        self.events.push(event.clone());
        event
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find_event(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn insert_product(&mut self, new: NewProduct) -> Product {
        self.next_product_id += 1;
        let product = Product {
            id: self.next_product_id,
            event_id: new.event_id,
            name: new.name,
            description: new.description,
            image_url: new.image_url,
            weight: new.weight,
            total_quantity: new.total_quantity,
            remaining_quantity: new.remaining_quantity,
            display_order: new.display_order,
            created_at: Utc::now(),
        };
        self.products.push(product.clone());
        product
    }

    pub fn find_product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn find_product_mut(&mut self, id: i64) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// 活动下的奖品, 按展示顺序
    pub fn products_by_event(&self, event_id: i64) -> Vec<Product> {
        let mut list: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect();
        list.sort_by_key(|p| (p.display_order, p.id));
        list
    }

    /// 当前库存快照
    pub fn prize_pool(&self, event_id: i64) -> Result<PrizePool, PoolError> {
        PrizePool::new(
            self.products_by_event(event_id)
                .iter()
                .map(Product::to_prize_item)
                .collect(),
        )
    }

    /// 库存减 1, 最低为 0
    pub fn decrement_stock(&mut self, product_id: i64) -> Option<u32> {
        let product = self.find_product_mut(product_id)?;
        product.remaining_quantity = product.remaining_quantity.saturating_sub(1);
        Some(product.remaining_quantity)
    }

    pub fn insert_record(&mut self, new: NewDrawRecord) -> &DrawRecord {
        self.next_record_id += 1;
        self.records.push(DrawRecord {
            id: self.next_record_id,
            event_id: new.event_id,
            batch_id: new.batch_id,
            product_id: new.product_id,
            product_name: new.product_name,
            is_win: new.is_win,
            seed: new.seed,
            created_at: Utc::now(),
        });
        &self.records[self.records.len() - 1]
    }

    /// 最新的在前
    pub fn records_by_event(&self, event_id: i64, limit: usize) -> Vec<DrawRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| r.event_id == event_id)
            .take(limit)
            .cloned()
            .collect()
    }
}
