// MySQL 数据库实现

use super::QuestionnaireRepository;
use crate::storage::models::{ListQuery, Questionnaire};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::info;

/// 连接池上限
const MAX_CONNECTIONS: u32 = 50;

/// MySQL 数据库实现
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// 创建新的 MySQL 数据库连接
    pub async fn new(url: &str) -> Result<Self> {
        info!("创建 MySQL 连接池...");
        let pool = MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .min_connections(2)
            .idle_timeout(std::time::Duration::from_secs(180))
            // 连接可复用的最大时间
            .max_lifetime(std::time::Duration::from_secs(60))
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(url)
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "创建 MySQL 连接池失败: {}\n\n请检查：\n1. MySQL 服务是否已启动\n2. DSN 中的地址、账号与密码是否正确\n3. 数据库是否已创建",
                    e
                )
            })?;

        info!("MySQL 连接池创建成功");

        let repo = Self { pool };

        // 初始化表结构
        repo.initialize_tables().await?;

        Ok(repo)
    }

    /// 获取连接池引用
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }
}

/// 拼接过滤条件，返回 WHERE 子句片段与对应的绑定值
fn build_filter(query: &ListQuery) -> (String, Vec<String>) {
    let mut clause = String::new();
    let mut binds = Vec::new();

    if !query.name.is_empty() {
        clause.push_str(" AND name LIKE ?");
        binds.push(format!("%{}%", query.name));
    }
    if !query.result.is_empty() {
        clause.push_str(" AND result = ?");
        binds.push(query.result.clone());
    }

    (clause, binds)
}

/// 把数据库行还原为问卷记录，答案列存的是JSON数组
fn row_to_questionnaire(row: &MySqlRow) -> Result<Questionnaire> {
    let id: i64 = row.try_get("id")?;
    let answers_json: String = row.try_get("answers")?;
    let answers = serde_json::from_str(&answers_json)
        .map_err(|e| anyhow::anyhow!("问卷 {} 的答案数据无法解析: {}", id, e))?;

    Ok(Questionnaire {
        id: Some(id),
        name: row.try_get("name")?,
        answers,
        result: row.try_get("result")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl QuestionnaireRepository for MySqlRepository {
    async fn initialize_tables(&self) -> Result<()> {
        // 创建问卷表
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questionnaires (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(256) NOT NULL,
                answers TEXT NOT NULL,
                result VARCHAR(256) NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        // 创建索引（MySQL 不支持 CREATE INDEX IF NOT EXISTS，需要忽略已存在错误）
        let _ = sqlx::query("CREATE INDEX idx_questionnaires_name ON questionnaires(name)")
            .execute(&self.pool)
            .await;
        let _ = sqlx::query("CREATE INDEX idx_questionnaires_result ON questionnaires(result)")
            .execute(&self.pool)
            .await;

        info!("MySQL 数据库表初始化完成");
        Ok(())
    }

    async fn insert_questionnaire(&self, questionnaire: &Questionnaire) -> Result<i64> {
        let answers_json = serde_json::to_string(&questionnaire.answers)?;
        let result = sqlx::query(
            r#"
            INSERT INTO questionnaires (name, answers, result, created_at)
            VALUES (?, ?, ?, ?)
        "#,
        )
        .bind(&questionnaire.name)
        .bind(&answers_json)
        .bind(&questionnaire.result)
        .bind(&questionnaire.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn list_questionnaires(&self, query: &ListQuery) -> Result<(Vec<Questionnaire>, i64)> {
        let (clause, binds) = build_filter(query);

        // 总数（分页前统计）
        let count_sql = format!("SELECT COUNT(*) FROM questionnaires WHERE 1=1{}", clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        // 按ID倒序，ID单调递增即按创建时间倒序
        let mut list_sql = format!(
            "SELECT id, name, answers, result, created_at FROM questionnaires WHERE 1=1{} ORDER BY id DESC",
            clause
        );
        if query.is_paged() {
            list_sql.push_str(" LIMIT ? OFFSET ?");
        }

        let mut list_query = sqlx::query(&list_sql);
        for bind in &binds {
            list_query = list_query.bind(bind);
        }
        if query.is_paged() {
            list_query = list_query
                .bind(query.page_size as i64)
                .bind(query.offset());
        }

        let rows = list_query.fetch_all(&self.pool).await?;

        let mut questionnaires = Vec::with_capacity(rows.len());
        for row in &rows {
            questionnaires.push(row_to_questionnaire(row)?);
        }

        Ok((questionnaires, total))
    }

    fn db_type(&self) -> &str {
        "mysql"
    }
}
