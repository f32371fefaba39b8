//! 成绩库管理
//! 整库以 MessagePack 序列化后 Base64 编码，写入键值槽的单个键；每次修改整体重写

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use rmp_serde::{Serializer, from_slice};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::clock::{Clock, SystemClock};
use super::query::ResultQuery;
use super::slot::KvSlot;
use crate::error::{ScorerError, ScorerResult};

/// 单条成绩记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub total_score: i64,
    pub timestamp: DateTime<Utc>,
}

/// 成绩库（results 表 + 自增计数）
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResultDatabase {
    // 自增 id，清空记录后不回退
    next_id: i64,
    records: Vec<Record>,
}

impl Default for ResultDatabase {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

impl ResultDatabase {
    fn encode(&self) -> ScorerResult<String> {
        let mut data = Vec::new();
        self.serialize(&mut Serializer::new(&mut data))
            .map_err(|e| ScorerError::MsgPackError(format!("序列化失败：{}", e)))?;
        debug!("成绩库序列化成功，序列化后数据大小：{} 字节", data.len());
        Ok(general_purpose::STANDARD.encode(&data))
    }

    fn decode(blob: &str) -> ScorerResult<Self> {
        let data = general_purpose::STANDARD.decode(blob.trim())?;
        let db: ResultDatabase = from_slice(&data)
            .map_err(|e| ScorerError::MsgPackError(format!("反序列化失败：{}", e)))?;
        debug!("成绩库反序列化成功，记录数：{}，下一个id：{}", db.records.len(), db.next_id);
        Ok(db)
    }
}

/// 成绩库存储
///
/// 初始化失败时保持未初始化状态，此后所有操作均为空操作
pub struct ResultStore<S: KvSlot> {
    slot: S,
    key: String,
    clock: Box<dyn Clock>,
    db: Option<ResultDatabase>,
}

impl<S: KvSlot> ResultStore<S> {
    /// 使用系统时钟初始化
    pub fn init(slot: S, key: impl Into<String>) -> Self {
        Self::init_with_clock(slot, key, Box::new(SystemClock))
    }

    /// 加载已有成绩库；不存在则新建并持久化；数据损坏时仅记录日志
    pub fn init_with_clock(slot: S, key: impl Into<String>, clock: Box<dyn Clock>) -> Self {
        let key = key.into();
        let mut store = Self {
            slot,
            key,
            clock,
            db: None,
        };

        match store.load() {
            Ok(db) => store.db = Some(db),
            Err(e) => error!("成绩库初始化失败：{}", e),
        }
        store
    }

    fn load(&self) -> ScorerResult<ResultDatabase> {
        match self.slot.get(&self.key)? {
            Some(blob) => ResultDatabase::decode(&blob),
            None => {
                let db = ResultDatabase::default();
                self.slot.set(&self.key, &db.encode()?)?;
                info!("未找到已有成绩库，已创建空库");
                Ok(db)
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.db.is_some()
    }

    /// 追加一条记录，失败时返回 false
    pub fn insert(&mut self, name: &str, score: i64) -> bool {
        match self.try_insert(name, score) {
            Ok(record) => {
                debug!("成绩已保存：id={}，姓名={}，得分={}", record.id, record.name, record.total_score);
                true
            }
            Err(e) => {
                error!("保存成绩失败：{}", e);
                false
            }
        }
    }

    /// 追加一条记录并返回该记录
    pub fn try_insert(&mut self, name: &str, score: i64) -> ScorerResult<Record> {
        let timestamp = self.clock.now();
        let db = self.db.as_mut().ok_or(ScorerError::StoreUninitialized)?;

        let record = Record {
            id: db.next_id,
            name: name.to_string(),
            total_score: score,
            timestamp,
        };
        db.records.push(record.clone());
        db.next_id += 1;

        if let Err(e) = self.persist() {
            // 持久化失败时回滚内存状态
            if let Some(db) = self.db.as_mut() {
                db.records.pop();
                db.next_id -= 1;
            }
            return Err(e);
        }
        Ok(record)
    }

    /// 全部记录，按 id 倒序
    pub fn list_all(&self) -> Vec<Record> {
        let Some(db) = &self.db else {
            return Vec::new();
        };
        let mut records = db.records.clone();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }

    /// 按条件检索
    pub fn query(&self, query: &ResultQuery) -> Vec<Record> {
        query.apply(self.list_all())
    }

    pub fn len(&self) -> usize {
        self.db.as_ref().map_or(0, |db| db.records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 删除全部记录，失败时返回 false
    pub fn delete_all(&mut self) -> bool {
        let Some(db) = self.db.as_mut() else {
            warn!("成绩库未初始化，忽略删除操作");
            return false;
        };

        let previous = std::mem::take(&mut db.records);
        let count = previous.len();
        match self.persist() {
            Ok(()) => {
                info!("已删除 {} 条成绩记录", count);
                true
            }
            Err(e) => {
                error!("删除成绩失败：{}", e);
                if let Some(db) = self.db.as_mut() {
                    db.records = previous;
                }
                false
            }
        }
    }

    fn persist(&self) -> ScorerResult<()> {
        let db = self.db.as_ref().ok_or(ScorerError::StoreUninitialized)?;
        let blob = db.encode()?;
        self.slot
            .set(&self.key, &blob)
            .map_err(|e| ScorerError::Persistence(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::clock::FixedClock;
    use crate::storage::slot::MemorySlot;
    use chrono::TimeZone;

    const KEY: &str = "test_db";

    fn fixed_clock() -> Box<dyn Clock> {
        Box::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()))
    }

    /// 写入总是失败的键值槽
    struct FailingSlot {
        inner: MemorySlot,
    }

    impl KvSlot for FailingSlot {
        fn get(&self, key: &str) -> ScorerResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> ScorerResult<()> {
            Err(ScorerError::Persistence("磁盘已满".to_string()))
        }

        fn remove(&self, key: &str) -> ScorerResult<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_init_creates_empty_store() {
        let slot = MemorySlot::new();
        let store = ResultStore::init(slot.clone(), KEY);
        assert!(store.is_initialized());
        assert!(store.list_all().is_empty());
        assert!(slot.get(KEY).unwrap().is_some());
    }

    #[test]
    fn test_insert_then_list() {
        let mut store = ResultStore::init_with_clock(MemorySlot::new(), KEY, fixed_clock());
        assert!(store.insert("Bob", 3));
        assert!(store.insert("Alice", 9));

        let records = store.list_all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alice");
        assert_eq!(records[0].total_score, 9);
        assert_eq!(records[0].id, 2);
        assert_eq!(records[1].id, 1);
        assert_eq!(records[0].timestamp, Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_reload_from_slot() {
        let slot = MemorySlot::new();
        {
            let mut store = ResultStore::init(slot.clone(), KEY);
            store.insert("Alice", 9);
            store.insert("Bob", -2);
        }

        let store = ResultStore::init(slot, KEY);
        let records = store.list_all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Bob");
        assert_eq!(records[0].total_score, -2);
    }

    #[test]
    fn test_delete_all_keeps_ids_unique() {
        let slot = MemorySlot::new();
        let mut store = ResultStore::init(slot.clone(), KEY);
        store.insert("A", 1);
        store.insert("B", 2);

        assert!(store.delete_all());
        assert!(store.list_all().is_empty());

        assert!(store.insert("C", 3));
        let records = store.list_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 3);

        // 计数器随整库持久化
        let mut reloaded = ResultStore::init(slot, KEY);
        assert!(reloaded.insert("D", 4));
        assert_eq!(reloaded.list_all()[0].id, 4);
    }

    #[test]
    fn test_corrupt_blob_leaves_store_uninitialized() {
        let slot = MemorySlot::new();
        slot.set(KEY, "@@not base64@@").unwrap();

        let mut store = ResultStore::init(slot.clone(), KEY);
        assert!(!store.is_initialized());
        assert!(!store.insert("Alice", 9));
        assert!(store.list_all().is_empty());
        assert!(!store.delete_all());
        assert!(matches!(
            store.try_insert("Alice", 9),
            Err(ScorerError::StoreUninitialized)
        ));
        // 损坏数据不被覆盖
        assert_eq!(slot.get(KEY).unwrap(), Some("@@not base64@@".to_string()));
    }

    #[test]
    fn test_valid_base64_invalid_msgpack() {
        let slot = MemorySlot::new();
        slot.set(KEY, &general_purpose::STANDARD.encode([0xc1u8, 0x00])).unwrap();
        let store = ResultStore::init(slot, KEY);
        assert!(!store.is_initialized());
    }

    #[test]
    fn test_persist_failure_rolls_back() {
        let inner = MemorySlot::new();
        // 预先写入空库，使初始化只需读取
        ResultStore::init(inner.clone(), KEY);

        let mut store = ResultStore::init(FailingSlot { inner }, KEY);
        assert!(store.is_initialized());
        assert!(!store.insert("Alice", 9));
        assert!(store.list_all().is_empty());
        assert!(!store.delete_all());
    }
}
