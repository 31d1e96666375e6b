// Repository 抽象层 - 定义数据库操作接口

pub mod mysql;
pub mod sqlite;

use super::models::{ListQuery, Questionnaire};
use anyhow::Result;
use async_trait::async_trait;

/// 数据库操作接口 - 所有数据库实现必须实现此 trait
///
/// 问卷记录只增不改：没有更新和删除操作
#[async_trait]
pub trait QuestionnaireRepository: Send + Sync {
    /// 初始化数据库表结构
    async fn initialize_tables(&self) -> Result<()>;

    /// 插入新问卷记录，返回数据库分配的自增ID
    async fn insert_questionnaire(&self, questionnaire: &Questionnaire) -> Result<i64>;

    /// 按条件查询问卷列表
    ///
    /// 返回按ID倒序排列的记录与过滤后的总数；总数不受分页影响。
    /// 没有命中任何记录不是错误，返回空列表与总数 0
    async fn list_questionnaires(&self, query: &ListQuery) -> Result<(Vec<Questionnaire>, i64)>;

    /// 获取数据库类型标识
    fn db_type(&self) -> &str;
}
