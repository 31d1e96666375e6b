// HTTP 服务 - 问卷提交与列表查询接口

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::info;

use crate::scoring::ANSWER_COUNT;
use crate::service::QuestionnaireService;
use crate::storage::ListQuery;

/// 接口错误 - 统一转成 {"error": ...} 的 JSON 响应
struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// 应用状态 - 显式注入问卷服务，各请求之间无共享可变状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QuestionnaireService>,
}

/// 问卷提交请求体
///
/// 答案按题号顺序排列，必须恰好30个，数量不符在反序列化阶段即被拒绝
#[derive(Deserialize)]
struct SubmitRequest {
    name: String,
    answers: [u8; ANSWER_COUNT],
}

/// 提交问卷，返回入库后的完整记录
async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let questionnaire = state.service.submit(&req.name, req.answers).await?;
    Ok(Json(questionnaire))
}

/// 查询问卷列表
/// 列表查询前端地址：/dist/#/useList
async fn result_list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (list, count) = state.service.list(&query).await?;
    Ok(Json(serde_json::json!({
        "page_num": query.page_num,
        "page_size": query.page_size,
        "count": count,
        "list": list,
    })))
}

/// 启动 HTTP 服务，阻塞到进程退出
pub async fn run(service: Arc<QuestionnaireService>, port: u16) -> Result<()> {
    let state = AppState { service };

    let app = Router::new()
        .route("/", post(submit))
        .route("/resultList", get(result_list))
        .nest_service("/dist", ServeDir::new("dist"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    info!("HTTP 服务启动: {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
