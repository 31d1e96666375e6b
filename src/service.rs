// 问卷服务 - 提交判定与列表查询

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::scoring::{classify, CategoryScores, ANSWER_COUNT};
use crate::storage::{local_now, ListQuery, Questionnaire, QuestionnaireRepository};

/// 列表展示记录
///
/// 五个维度的分数由存储的答案重新计算，不读取任何落库的派生列
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub id: i64,
    pub name: String,
    pub result: String,
    #[serde(flatten)]
    pub scores: CategoryScores,
    pub created_at: String,
}

/// 问卷服务 - 持有注入的存储实现，无其他共享状态
pub struct QuestionnaireService {
    repo: Arc<dyn QuestionnaireRepository>,
}

impl QuestionnaireService {
    /// 创建新的问卷服务
    pub fn new(repo: Arc<dyn QuestionnaireRepository>) -> Self {
        Self { repo }
    }

    /// 提交一份问卷
    ///
    /// 姓名为空在判定前就被拒绝；结果标签始终由答案重新计算，
    /// 入库后返回带ID与创建时间的完整记录
    pub async fn submit(&self, name: &str, answers: [u8; ANSWER_COUNT]) -> Result<Questionnaire> {
        let name = name.trim();
        if name.is_empty() {
            bail!("姓名不能为空");
        }

        let mut questionnaire = Questionnaire {
            id: None,
            name: name.to_string(),
            answers,
            result: classify(&answers).to_string(),
            created_at: Some(local_now()),
        };

        let id = self
            .repo
            .insert_questionnaire(&questionnaire)
            .await
            .context("保存问卷失败")?;
        questionnaire.id = Some(id);

        info!(
            "新问卷已保存: id={} name={} result={}",
            id, questionnaire.name, questionnaire.result
        );
        Ok(questionnaire)
    }

    /// 查询问卷列表
    ///
    /// # 参数
    /// - `query`: 过滤与分页条件
    ///
    /// # 返回
    /// - 展示记录列表与过滤后的总数（总数不受分页影响）
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<QuestionnaireView>, i64)> {
        let (records, total) = self
            .repo
            .list_questionnaires(query)
            .await
            .context("查询问卷列表失败")?;

        let views = records
            .into_iter()
            .map(|record| QuestionnaireView {
                id: record.id.unwrap_or_default(),
                name: record.name,
                result: record.result,
                scores: CategoryScores::from_answers(&record.answers),
                created_at: record
                    .created_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
            })
            .collect();

        Ok((views, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteRepository;

    async fn test_service() -> (QuestionnaireService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let repo = SqliteRepository::new(path.to_str().unwrap())
            .await
            .unwrap();
        (QuestionnaireService::new(Arc::new(repo)), dir)
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_name() {
        let (service, _dir) = test_service().await;

        let err = service
            .submit("   ", [0u8; ANSWER_COUNT])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("姓名不能为空"));
    }

    #[tokio::test]
    async fn test_submit_computes_result() {
        let (service, _dir) = test_service().await;

        // 第5题属于老虎维度
        let mut answers = [0u8; ANSWER_COUNT];
        answers[4] = 5;

        let saved = service.submit("张三", answers).await.unwrap();
        assert_eq!(saved.result, "老虎");
        assert!(saved.id.unwrap() > 0);
        assert!(saved.created_at.is_some());
    }

    #[tokio::test]
    async fn test_list_recomputes_scores_from_answers() {
        let (service, _dir) = test_service().await;

        let mut answers = [0u8; ANSWER_COUNT];
        answers[2] = 4; // 第3题 - 孔雀
        answers[16] = 2; // 第17题 - 考拉
        let expected = CategoryScores::from_answers(&answers);

        service.submit("李四", answers).await.unwrap();

        let (views, total) = service.list(&ListQuery::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(views[0].name, "李四");
        assert_eq!(views[0].result, "孔雀");
        assert_eq!(views[0].scores, expected);
        // 创建时间格式化为 "YYYY-MM-DD HH:MM:SS"
        assert_eq!(views[0].created_at.len(), 19);
    }
}
