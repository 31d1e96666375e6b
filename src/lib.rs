// PDP性格测试问卷服务 - 主库

// 声明模块
pub mod logger;
pub mod scoring;
pub mod server;
pub mod service;
pub mod storage;

// 重新导出主要类型
pub use server::AppState;
pub use service::{QuestionnaireService, QuestionnaireView};
