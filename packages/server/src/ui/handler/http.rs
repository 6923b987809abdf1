//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{GroupId, GroupName, MessageContent, MessageId, UserId, ValueObjectError},
    infrastructure::dto::{
        http::{
            AddMemberRequest, ConnectionStatsResponse, CreateGroupRequest, ErrorResponse,
            GroupDetailResponse, HealthResponse, MessageListResponse, MessageResponse,
            PaginationQuery, SendMessageBody, SendMessageQuery,
        },
        websocket::ServerMessage,
    },
    ui::state::AppState,
    usecase::{GetMessageError, GetMessagesError, GroupError, SendMessageError},
};

/// HTTP API のエラーレスポンス
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(error: ValueObjectError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, error.to_string())
    }
}

impl From<GroupError> for ApiError {
    fn from(error: GroupError) -> Self {
        let status = match error {
            GroupError::NotFound(_) => StatusCode::NOT_FOUND,
            GroupError::Duplicate(_) => StatusCode::CONFLICT,
            GroupError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, error.to_string())
    }
}

impl From<GetMessagesError> for ApiError {
    fn from(error: GetMessagesError) -> Self {
        let status = match error {
            GetMessagesError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            GetMessagesError::InvalidPage(_) | GetMessagesError::InvalidPageSize { .. } => {
                StatusCode::BAD_REQUEST
            }
            GetMessagesError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, error.to_string())
    }
}

impl From<SendMessageError> for ApiError {
    fn from(error: SendMessageError) -> Self {
        let status = match error {
            SendMessageError::GroupNotFound(_) | SendMessageError::NotGroupMember { .. } => {
                StatusCode::NOT_FOUND
            }
            SendMessageError::Validation(_) => StatusCode::BAD_REQUEST,
            SendMessageError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, error.to_string())
    }
}

impl From<GetMessageError> for ApiError {
    fn from(error: GetMessageError) -> Self {
        let status = match error {
            GetMessageError::NotFound(_) => StatusCode::NOT_FOUND,
            GetMessageError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, error.to_string())
    }
}

// 抽出に失敗したリクエストも `{"error": ...}` の形で返す
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Live connection statistics
pub async fn get_connection_stats(
    State(state): State<Arc<AppState>>,
) -> Json<ConnectionStatsResponse> {
    let stats = state.get_connection_stats_usecase.execute().await;
    Json(stats.into())
}

/// Create a group
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    request: Result<Json<CreateGroupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GroupDetailResponse>), ApiError> {
    let Json(request) = request?;

    // Convert String -> Domain Models
    let group_id = request.group_id.map(GroupId::new).transpose()?;
    let name = GroupName::new(request.name)?;
    let member_ids = request
        .member_ids
        .into_iter()
        .map(UserId::new)
        .collect::<Result<Vec<_>, _>>()?;

    let group = state
        .create_group_usecase
        .execute(group_id, name, member_ids)
        .await?;

    Ok((StatusCode::CREATED, Json(GroupDetailResponse::from(&group))))
}

/// Get group detail by ID
pub async fn get_group_detail(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupDetailResponse>, ApiError> {
    let group_id = GroupId::new(group_id)?;
    let group = state.get_group_detail_usecase.execute(group_id).await?;
    Ok(Json(GroupDetailResponse::from(&group)))
}

/// Add a member to a group
pub async fn add_group_member(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
    request: Result<Json<AddMemberRequest>, JsonRejection>,
) -> Result<Json<GroupDetailResponse>, ApiError> {
    let Json(request) = request?;
    let group_id = GroupId::new(group_id)?;
    let user_id = UserId::new(request.user_id)?;
    let group = state
        .add_group_member_usecase
        .execute(group_id, user_id)
        .await?;
    Ok(Json(GroupDetailResponse::from(&group)))
}

/// Get paginated message history of a group (newest first)
pub async fn get_group_messages(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
    pagination: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<MessageListResponse>, ApiError> {
    let Query(pagination) = pagination?;
    let group_id = GroupId::new(group_id)?;
    let page = state
        .get_messages_usecase
        .execute(group_id, pagination.page, pagination.page_size)
        .await?;
    Ok(Json(page.into()))
}

/// Send a message to a group on behalf of `from_user_id`
///
/// 保存後、WebSocket で接続中の他のメンバーにも `new_message` を通知します。
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SendMessageQuery>, QueryRejection>,
    body: Result<Json<SendMessageBody>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Query(query) = query?;
    let Json(body) = body?;

    // Convert String -> Domain Models
    let from = UserId::new(query.from_user_id)?;
    let group_id = GroupId::new(body.group_id)?;
    let content = MessageContent::new(body.content)?;

    let message = state
        .send_message_usecase
        .execute(from, group_id, content)
        .await?;

    let notification = ServerMessage::new_message(&message).to_value();
    let notified = state
        .send_message_usecase
        .notify_group(&message, notification)
        .await;
    tracing::debug!(
        "Message '{}' delivered to {} member(s)",
        message.id.as_str(),
        notified
    );

    Ok((StatusCode::CREATED, Json(MessageResponse::from(&message))))
}

/// Get a single message by ID
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = state
        .get_message_usecase
        .execute(MessageId::new(message_id))
        .await?;
    Ok(Json(MessageResponse::from(&message)))
}
