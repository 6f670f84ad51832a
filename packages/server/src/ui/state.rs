//! Server state shared by every handler.

use std::{sync::Arc, time::Duration};

use sellgadgetz_shared::time::Clock;

use crate::{
    domain::{ChatRepository, CredentialHasher, MessagePusher, SessionRepository, UserRepository},
    usecase::{
        AuthenticateUseCase, ConnectParticipantUseCase, CreateRoomUseCase,
        DisconnectParticipantUseCase, EnsureSupportRoomUseCase, FanOutMessageUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, GetSupportRoomUseCase, GetUnreadCountUseCase,
        ListMessagesUseCase, ListUsersUseCase, LoginUseCase, LogoutUseCase,
        PurgeExpiredSessionsUseCase, RegisterUserUseCase, SeedAdminUseCase, SendMessageUseCase,
        StartSessionUseCase,
    },
};

/// Ports the use cases are built from
pub struct Dependencies {
    pub chat_repository: Arc<dyn ChatRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub session_repository: Arc<dyn SessionRepository>,
    pub message_pusher: Arc<dyn MessagePusher>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub clock: Arc<dyn Clock>,
    pub session_ttl: Duration,
}

/// Shared application state
pub struct AppState {
    /// MessagePusher（接続レジストリ。シャットダウン時に閉じる）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// セッションの有効期間（Cookie の Max-Age）
    pub session_ttl: Duration,

    // chat
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub get_support_room_usecase: Arc<GetSupportRoomUseCase>,
    pub ensure_support_room_usecase: Arc<EnsureSupportRoomUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub list_messages_usecase: Arc<ListMessagesUseCase>,
    pub get_unread_count_usecase: Arc<GetUnreadCountUseCase>,

    // realtime
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    pub fan_out_message_usecase: Arc<FanOutMessageUseCase>,

    // auth
    pub register_user_usecase: Arc<RegisterUserUseCase>,
    pub start_session_usecase: Arc<StartSessionUseCase>,
    pub login_usecase: Arc<LoginUseCase>,
    pub authenticate_usecase: Arc<AuthenticateUseCase>,
    pub logout_usecase: Arc<LogoutUseCase>,
    pub list_users_usecase: Arc<ListUsersUseCase>,
    pub seed_admin_usecase: Arc<SeedAdminUseCase>,
    pub purge_expired_sessions_usecase: Arc<PurgeExpiredSessionsUseCase>,
}

impl AppState {
    /// Wire every use case from the given ports
    pub fn new(deps: Dependencies) -> Self {
        let Dependencies {
            chat_repository,
            user_repository,
            session_repository,
            message_pusher,
            hasher,
            clock,
            session_ttl,
        } = deps;

        // 1. Chat
        let create_room_usecase = Arc::new(CreateRoomUseCase::new(
            chat_repository.clone(),
            user_repository.clone(),
            clock.clone(),
        ));
        let get_support_room_usecase =
            Arc::new(GetSupportRoomUseCase::new(chat_repository.clone()));
        let ensure_support_room_usecase = Arc::new(EnsureSupportRoomUseCase::new(
            get_support_room_usecase.clone(),
            create_room_usecase.clone(),
        ));

        // 2. Realtime
        let fan_out_message_usecase = Arc::new(FanOutMessageUseCase::new(
            chat_repository.clone(),
            message_pusher.clone(),
        ));

        // 3. Auth
        let register_user_usecase = Arc::new(RegisterUserUseCase::new(
            user_repository.clone(),
            hasher.clone(),
            clock.clone(),
        ));
        let start_session_usecase = Arc::new(StartSessionUseCase::new(
            session_repository.clone(),
            clock.clone(),
            session_ttl,
        ));

        Self {
            session_ttl,
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(chat_repository.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(chat_repository.clone())),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                chat_repository.clone(),
                clock.clone(),
            )),
            list_messages_usecase: Arc::new(ListMessagesUseCase::new(chat_repository.clone())),
            get_unread_count_usecase: Arc::new(GetUnreadCountUseCase::new(chat_repository)),
            create_room_usecase,
            get_support_room_usecase,
            ensure_support_room_usecase,
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                message_pusher.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                message_pusher.clone(),
            )),
            fan_out_message_usecase,
            login_usecase: Arc::new(LoginUseCase::new(
                user_repository.clone(),
                hasher,
                start_session_usecase.clone(),
            )),
            authenticate_usecase: Arc::new(AuthenticateUseCase::new(
                session_repository.clone(),
                user_repository.clone(),
                clock.clone(),
            )),
            logout_usecase: Arc::new(LogoutUseCase::new(session_repository.clone())),
            list_users_usecase: Arc::new(ListUsersUseCase::new(user_repository.clone())),
            seed_admin_usecase: Arc::new(SeedAdminUseCase::new(
                user_repository,
                register_user_usecase.clone(),
            )),
            purge_expired_sessions_usecase: Arc::new(PurgeExpiredSessionsUseCase::new(
                session_repository,
                clock,
            )),
            register_user_usecase,
            start_session_usecase,
            message_pusher,
        }
    }
}
