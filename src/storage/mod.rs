// 存储模块 - 统一的数据库抽象层

// 子模块
pub mod config;
pub mod models;
pub mod repository;

// 重新导出主要类型
pub use config::DatabaseConfig;
pub use models::*;
pub use repository::QuestionnaireRepository;

// 重新导出具体实现（可选，用于高级用法）
pub use repository::mysql::MySqlRepository;
pub use repository::sqlite::SqliteRepository;

use std::sync::Arc;

use anyhow::Result;

/// 根据配置创建对应的数据库实现并完成表初始化
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn QuestionnaireRepository>> {
    match config {
        DatabaseConfig::MySQL { url } => Ok(Arc::new(MySqlRepository::new(url).await?)),
        DatabaseConfig::SQLite { db_path } => Ok(Arc::new(SqliteRepository::new(db_path).await?)),
    }
}
