use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::time::sleep;

use super::ballot::{Ballot, BallotSnapshot};
use super::parser::parse_vote;
use crate::config::PollConfig;
use crate::rumble::client::RumbleClient;
use crate::rumble::errors::RumbleError;
use crate::rumble::selector::select_livestream;
use crate::rumble::timestamp::parse_timestamp;

/// 投票の実行中に発生するイベント
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PollEvent {
    /// 投票を1件受理した
    #[serde(rename = "voteRecorded")]
    VoteRecorded { voter: String, option: String },

    /// 1回のポーリング処理が完了した（取得に失敗したtickでも発生する）
    #[serde(rename = "update")]
    Update { snapshot: BallotSnapshot },

    /// 投票が終了した
    ///
    /// `ended_early` は時間切れならfalse、外部からの中断ならtrue。
    #[serde(rename = "finished")]
    Finished {
        snapshot: BallotSnapshot,
        ended_early: bool,
    },
}

/// 投票の実行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Running,
    Completed,
    Aborted,
}

#[derive(Error, Debug)]
pub enum PollError {
    #[error("poll is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Rumble(#[from] RumbleError),
}

/// 実行中の投票を外部から中断するためのハンドル
///
/// どのスレッドからでも `request_abort` を呼べる。エンジンはフラグを
/// 各tickの終端でのみ確認するため、中断が反映されるのは進行中の
/// 取得・集計が完了した後になる。
#[derive(Clone)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    /// 次のtick境界で投票を中断するよう要求する
    pub fn request_abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_abort_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// チャット投票エンジン
///
/// ポーリングループの本体。1tickごとに
/// 待機 → チャット取得 → 対象配信の選択 → 投票の集計 → 通知 → 終了判定
/// を順に行う。取得以外のすべての処理は単一の制御フロー上で同期的に走る。
pub struct PollEngine {
    config: PollConfig,
    client: RumbleClient,
    ballot: Option<Ballot>,
    state: PollState,
    abort: Arc<AtomicBool>,
}

impl PollEngine {
    pub fn new(config: PollConfig, client: RumbleClient) -> Self {
        Self {
            config,
            client,
            ballot: None,
            state: PollState::Idle,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// 中断用ハンドルを取得（cloneして複数の場所へ渡せる）
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            flag: Arc::clone(&self.abort),
        }
    }

    /// 現在の集計のスナップショットを取得
    pub fn snapshot(&self) -> BallotSnapshot {
        match &self.ballot {
            Some(ballot) => ballot.snapshot(),
            None => Ballot::new(&self.config.options).snapshot(),
        }
    }

    /// 投票を実行する
    ///
    /// `reset_ballot` がfalseなら前回の集計と投票済みリストを引き継ぎ、
    /// 追加の投票を受け付ける（集計がまだ存在しない場合は常に新規作成）。
    /// どちらの場合も投票ウィンドウの起点は今回の開始時刻になる。
    ///
    /// 時間切れまたは中断で終了した場合は終了時の状態を返す。
    /// 対象配信を選択できなかった場合はエラーを返し、状態は `Aborted` になる。
    pub async fn run<F>(&mut self, reset_ballot: bool, on_event: F) -> Result<PollState, PollError>
    where
        F: Fn(PollEvent) + Send + Sync,
    {
        if self.state == PollState::Running {
            return Err(PollError::AlreadyRunning);
        }

        let mut ballot = if reset_ballot {
            Ballot::new(&self.config.options)
        } else {
            // 引き継ぎ指定でも集計が無ければ新規作成する
            self.ballot
                .take()
                .unwrap_or_else(|| Ballot::new(&self.config.options))
        };

        // ハンドルは使い回せるように、開始時にフラグを倒しておく
        self.abort.store(false, Ordering::SeqCst);
        self.state = PollState::Running;

        let start_time = Utc::now();
        let started = Instant::now();

        log::info!(
            "Poll started: {} options, duration {:?}, refresh every {:?}",
            self.config.options.len(),
            self.config.duration,
            self.config.refresh_interval
        );

        loop {
            sleep(self.config.refresh_interval).await;

            match self.client.fetch_chat().await {
                Ok(response) => {
                    let stream = match select_livestream(
                        &response.livestreams,
                        self.config.livestream_id.as_deref(),
                    ) {
                        Ok(stream) => stream,
                        Err(error) => {
                            // 配信を特定できなければ続行しても意味がない
                            log::error!("Livestream selection failed: {}", error);
                            self.state = PollState::Aborted;
                            self.ballot = Some(ballot);
                            return Err(error.into());
                        }
                    };

                    for message in &stream.chat.recent_messages {
                        let created_on = match parse_timestamp(
                            &message.created_on,
                            &self.config.timestamp_format,
                        ) {
                            Ok(timestamp) => timestamp,
                            Err(error) => {
                                log::warn!(
                                    "Skipping message with unparseable timestamp {:?}: {}",
                                    message.created_on,
                                    error
                                );
                                continue;
                            }
                        };

                        // 投票開始前のメッセージと投票済みユーザーは対象外
                        if created_on < start_time {
                            continue;
                        }
                        if ballot.has_voted(&message.username) {
                            continue;
                        }

                        if let Some(option) = parse_vote(
                            &message.text,
                            &self.config.options,
                            self.config.numeric_votes,
                        ) {
                            let option = option.to_string();
                            ballot.record_vote(&option, &message.username);
                            log::debug!("Vote recorded: {} -> {}", message.username, option);
                            on_event(PollEvent::VoteRecorded {
                                voter: message.username.clone(),
                                option,
                            });
                        }
                    }
                }
                Err(error) => {
                    // 取得失敗はこのtickの集計をスキップするだけで、次のtickで再開する
                    log::warn!("Chat fetch failed, skipping this tick: {}", error);
                }
            }

            on_event(PollEvent::Update {
                snapshot: ballot.snapshot(),
            });

            if started.elapsed() >= self.config.duration {
                self.state = PollState::Completed;
                break;
            }
            if self.abort.load(Ordering::SeqCst) {
                self.state = PollState::Aborted;
                break;
            }
        }

        let ended_early = self.state == PollState::Aborted;
        log::info!(
            "Poll finished ({}): {} votes",
            if ended_early { "aborted" } else { "duration elapsed" },
            ballot.total_votes()
        );

        on_event(PollEvent::Finished {
            snapshot: ballot.snapshot(),
            ended_early,
        });

        self.ballot = Some(ballot);
        Ok(self.state)
    }
}
