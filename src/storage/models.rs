// 数据模型定义 - 数据库实体结构

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::ANSWER_COUNT;

/// 获取当前本地时间（以 DateTime<Utc> 类型表示，但值为本地时间）
/// 用于将本地时间存储到数据库中
pub fn local_now() -> DateTime<Utc> {
    Local::now().naive_local().and_utc()
}

/// 问卷记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: Option<i64>,
    pub name: String,
    /// 30道题的答案，按题号顺序排列，入库时序列化为JSON数组
    pub answers: [u8; ANSWER_COUNT],
    /// 判定结果标签，持久化前由答案重新计算，不接受调用方传入
    pub result: String,
    #[serde(serialize_with = "serialize_datetime_as_local_option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// 列表查询条件
///
/// 空字符串表示不过滤；页码与页大小任一为 0 表示不分页、返回全部
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// 姓名模糊匹配
    #[serde(default)]
    pub name: String,
    /// 结果标签精确匹配
    #[serde(default)]
    pub result: String,
    /// 页大小
    #[serde(default)]
    pub page_size: u32,
    /// 页码，从1开始
    #[serde(default)]
    pub page_num: u32,
}

impl ListQuery {
    /// 页码与页大小都非零才启用分页
    pub fn is_paged(&self) -> bool {
        self.page_size != 0 && self.page_num != 0
    }

    /// 分页偏移量
    pub fn offset(&self) -> i64 {
        (self.page_num as i64 - 1) * self.page_size as i64
    }
}

/// 自定义序列化：DateTime<Utc> -> 不带时区标记的字符串
/// 数据库中存储的已经是本地时间（虽然类型是DateTime<Utc>），
/// 直接格式化为 "YYYY-MM-DD HH:MM:SS"，前端不再做时区转换
fn serialize_datetime_as_local_option<S>(
    dt: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        None => serializer.serialize_none(),
    }
}
