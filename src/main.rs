use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use rumble_chat_poll::config::{Settings, DEFAULT_CONFIG_PATH};
use rumble_chat_poll::poll::{PollEngine, PollEvent, PollState};
use rumble_chat_poll::rumble::RumbleClient;

/// Rumbleのライブチャットで投票を実施するCLIツール
#[derive(Parser, Debug)]
#[command(name = "rumble-chat-poll", version, about = "Run a chat poll on a Rumble livestream")]
struct Args {
    /// 設定ファイルのパス
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 投票時間（秒）。設定ファイルの値を上書きする
    #[arg(short, long)]
    duration: Option<u64>,

    /// 投票を実施する回数
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// 2回目以降も集計をリセットせず引き継ぐ
    #[arg(long)]
    carry_ballot: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::load(&args.config)?;
    if let Some(secs) = args.duration {
        settings.poll.duration = Duration::from_secs(secs);
    }

    let client = RumbleClient::new(settings.api_url.clone(), settings.headers.clone())?;
    let mut engine = PollEngine::new(settings.poll.clone(), client);

    // Ctrl-Cで実行中の投票を中断する（次のtick境界で反映される）
    let abort = engine.abort_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Ctrl-C received, aborting poll");
            abort.request_abort();
        }
    });

    for round in 1..=args.rounds {
        if args.rounds > 1 {
            log::info!("Poll round {}/{}", round, args.rounds);
        }

        let reset_ballot = !(args.carry_ballot && round > 1);
        let state = engine.run(reset_ballot, print_event).await?;

        if state == PollState::Aborted {
            // 中断されたら残りのラウンドは実施しない
            break;
        }
    }

    Ok(())
}

/// 投票イベントをコンソールに表示する
fn print_event(event: PollEvent) {
    match event {
        PollEvent::VoteRecorded { voter, option } => {
            log::info!("Vote: {} -> {}", voter, option);
        }
        PollEvent::Update { snapshot } => {
            let standings = snapshot
                .standings
                .iter()
                .map(|standing| format!("{}: {}", standing.option, standing.votes))
                .collect::<Vec<_>>()
                .join(", ");
            log::info!("Standings: {} (total {})", standings, snapshot.total_votes);
        }
        PollEvent::Finished {
            snapshot,
            ended_early,
        } => {
            println!();
            println!(
                "==== Poll result{} ====",
                if ended_early { " (aborted)" } else { "" }
            );
            for standing in &snapshot.standings {
                println!("{:>5}  {}", standing.votes, standing.option);
            }
            println!("Total votes: {}", snapshot.total_votes);
            if let Some(winner) = &snapshot.current_winner {
                println!("Winner: {}", winner);
            }
        }
    }
}
