use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// 1つの選択肢の得票状況
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionStanding {
    pub option: String,
    pub votes: usize,
    pub voters: Vec<String>,
}

/// 集計のスナップショット（オブザーバーへの通知用）
///
/// standings は選択肢の設定順に並ぶ。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BallotSnapshot {
    pub standings: Vec<OptionStanding>,
    pub total_votes: usize,
    pub current_winner: Option<String>,
}

/// 投票箱
///
/// 選択肢ごとに投票者のリストを到着順で保持する。1人の投票者は
/// 全選択肢を通して最大1つのリストにしか現れない。
pub struct Ballot {
    /// 選択肢（設定された順序を保持する）
    options: Vec<String>,
    /// 選択肢 -> 投票者リスト
    votes: HashMap<String, Vec<String>>,
    /// 投票済みの投票者
    voted: HashSet<String>,
}

impl Ballot {
    /// 全選択肢が空のリストに紐づいた状態の投票箱を作成
    pub fn new(options: &[String]) -> Self {
        let votes = options
            .iter()
            .map(|option| (option.clone(), Vec::new()))
            .collect();

        Self {
            options: options.to_vec(),
            votes,
            voted: HashSet::new(),
        }
    }

    /// 投票を記録する
    ///
    /// 呼び出し側が `has_voted` で未投票であることを確認してから呼ぶこと。
    pub fn record_vote(&mut self, option: &str, voter: &str) {
        if let Some(voters) = self.votes.get_mut(option) {
            voters.push(voter.to_string());
            self.voted.insert(voter.to_string());
        } else {
            log::warn!("Attempted to record vote for unknown option: {}", option);
        }
    }

    /// 投票済みかどうか
    pub fn has_voted(&self, voter: &str) -> bool {
        self.voted.contains(voter)
    }

    /// 現在の勝者（最も投票者リストが長い選択肢）
    ///
    /// 同数の場合は設定順で先に現れた選択肢が勝つ。HashMapの走査順には
    /// 依存しない。
    pub fn current_winner(&self) -> Option<&str> {
        let max = self.options.iter().map(|option| self.count(option)).max()?;
        self.options
            .iter()
            .find(|option| self.count(option) == max)
            .map(|option| option.as_str())
    }

    /// 総投票数
    pub fn total_votes(&self) -> usize {
        self.votes.values().map(|voters| voters.len()).sum()
    }

    /// 選択肢ごとの投票者リスト（設定順）
    pub fn voters_for(&self, option: &str) -> &[String] {
        self.votes
            .get(option)
            .map(|voters| voters.as_slice())
            .unwrap_or(&[])
    }

    fn count(&self, option: &str) -> usize {
        self.voters_for(option).len()
    }

    /// 現在の集計のスナップショットを作成
    pub fn snapshot(&self) -> BallotSnapshot {
        let standings = self
            .options
            .iter()
            .map(|option| OptionStanding {
                option: option.clone(),
                votes: self.count(option),
                voters: self.voters_for(option).to_vec(),
            })
            .collect();

        BallotSnapshot {
            standings,
            total_votes: self.total_votes(),
            current_winner: self.current_winner().map(|winner| winner.to_string()),
        }
    }
}
