// =============================================================================
// Rumble Live Stream API連携モジュール
// =============================================================================
// ライブ配信とチャットの取得・対象配信の選択・タイムスタンプの正規化
//
// 使用API: Rumble Live Stream API
// https://rumblefaq.groovehq.com/help/how-to-use-rumble-s-live-stream-api
// =============================================================================

pub mod client;
pub mod errors;
pub mod selector;
pub mod timestamp;
pub mod types;

pub use client::RumbleClient;
pub use errors::RumbleError;
pub use selector::select_livestream;
pub use timestamp::parse_timestamp;
pub use types::{ChatMessage, ChatResponse, Livestream, LivestreamChat};
