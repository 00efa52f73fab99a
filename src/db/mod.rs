pub mod redis_store;
pub mod storage;

pub use redis_store::RedisStorage;
pub use storage::{
    create_storage, load_list, save_list, FileStorage, MemoryStorage, Storage, StorageKey,
};
