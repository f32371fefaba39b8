//! 存储模块：键值槽、成绩库、检索与界面偏好
pub mod slot;
pub mod clock;
pub mod result_store;
pub mod query;
pub mod preferences;

// 导出核心接口
pub use self::slot::{FileSlot, KvSlot, MemorySlot};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::result_store::{Record, ResultStore};
pub use self::query::{ResultQuery, SortOrder};
pub use self::preferences::Preferences;
