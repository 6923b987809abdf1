//! Shared application state.

use std::sync::Arc;

use hibiki_shared::time::Clock;

use crate::{
    domain::{GroupRepository, MessagePusher, MessageRepository},
    usecase::{
        AddGroupMemberUseCase, ConnectUserUseCase, CreateGroupUseCase, DisconnectUserUseCase,
        GetConnectionStatsUseCase, GetGroupDetailUseCase, GetMessageUseCase, GetMessagesUseCase,
        PushMessageUseCase, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// MessagePusher（発信元の接続への返信に使う）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// ConnectUserUseCase（ユーザー接続のユースケース）
    pub connect_user_usecase: Arc<ConnectUserUseCase>,
    /// DisconnectUserUseCase（ユーザー切断のユースケース）
    pub disconnect_user_usecase: Arc<DisconnectUserUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// GetConnectionStatsUseCase（接続統計取得のユースケース）
    pub get_connection_stats_usecase: Arc<GetConnectionStatsUseCase>,
    /// CreateGroupUseCase（グループ作成のユースケース）
    pub create_group_usecase: Arc<CreateGroupUseCase>,
    /// AddGroupMemberUseCase（メンバー追加のユースケース）
    pub add_group_member_usecase: Arc<AddGroupMemberUseCase>,
    /// GetGroupDetailUseCase（グループ詳細取得のユースケース）
    pub get_group_detail_usecase: Arc<GetGroupDetailUseCase>,
    /// GetMessageUseCase（メッセージ 1 件取得のユースケース）
    pub get_message_usecase: Arc<GetMessageUseCase>,
    /// GetMessagesUseCase（メッセージ履歴取得のユースケース）
    pub get_messages_usecase: Arc<GetMessagesUseCase>,
}

impl AppState {
    /// 依存関係から全てのユースケースを組み立てる
    ///
    /// # Arguments
    ///
    /// * `message_pusher` - 接続レジストリ
    /// * `group_repository` - グループとメンバーシップ
    /// * `message_repository` - メッセージの保存先
    /// * `clock` - 時刻の取得元
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        group_repository: Arc<dyn GroupRepository>,
        message_repository: Arc<dyn MessageRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let push_message_usecase = Arc::new(PushMessageUseCase::new(
            message_pusher.clone(),
            clock.clone(),
        ));

        Self {
            connect_user_usecase: Arc::new(ConnectUserUseCase::new(message_pusher.clone())),
            disconnect_user_usecase: Arc::new(DisconnectUserUseCase::new(message_pusher.clone())),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                group_repository.clone(),
                message_repository.clone(),
                push_message_usecase,
                clock.clone(),
            )),
            get_connection_stats_usecase: Arc::new(GetConnectionStatsUseCase::new(
                message_pusher.clone(),
            )),
            create_group_usecase: Arc::new(CreateGroupUseCase::new(
                group_repository.clone(),
                clock,
            )),
            add_group_member_usecase: Arc::new(AddGroupMemberUseCase::new(
                group_repository.clone(),
            )),
            get_group_detail_usecase: Arc::new(GetGroupDetailUseCase::new(
                group_repository.clone(),
            )),
            get_message_usecase: Arc::new(GetMessageUseCase::new(message_repository.clone())),
            get_messages_usecase: Arc::new(GetMessagesUseCase::new(
                group_repository,
                message_repository,
            )),
            message_pusher,
        }
    }
}
