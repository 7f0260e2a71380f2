// =============================================================================
// チャット投票モジュール
// =============================================================================
// 投票箱の状態管理・メッセージの投票判定・ポーリングループ本体
//
// 機能:
// - 選択肢との完全一致または番号（1始まり）での投票
// - 1ユーザー1票（先着のみ有効）
// - 一定間隔でのチャット取得と、時間切れ/外部中断による終了
// =============================================================================

pub mod ballot;
pub mod engine;
pub mod parser;

pub use ballot::{Ballot, BallotSnapshot, OptionStanding};
pub use engine::{AbortHandle, PollEngine, PollError, PollEvent, PollState};
pub use parser::parse_vote;
