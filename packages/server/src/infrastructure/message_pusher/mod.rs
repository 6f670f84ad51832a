//! メッセージ送信（通知）の実装
//!
//! ## 概要
//!
//! このモジュールは `MessagePusher` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `websocket`: プロセス内の WebSocket 接続レジストリを使った実装
//!
//! 複数インスタンス構成にする場合は、共有ブローカーを使う実装を追加して
//! `main` で差し替える。Gateway 側のロジックは変更不要。

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
