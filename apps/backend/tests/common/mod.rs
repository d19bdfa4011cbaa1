#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;
use std::time::Duration;

use mancala_backend::domain::board::{Board, Row};
use mancala_backend::domain::state::{Match, MatchId, PlayerId};
use mancala_backend::errors::domain::DomainError;
use mancala_backend::repos::{InMemoryMatchRepo, MatchRepo};
use mancala_backend::services::dealer::MatchDealer;
use mancala_backend::services::pipeline::MoveReport;
use mancala_backend::DealerConfig;
use once_cell::sync::OnceCell;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

// Logging is auto-installed for every test binary that pulls in `common`
#[ctor::ctor]
fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Small pools and a lock that expires at once, so consecutive moves in a
/// test are only gated by the in-flight check.
pub fn test_config() -> DealerConfig {
    DealerConfig {
        sow_workers: 4,
        completion_workers: 2,
        lock_ttl: Duration::ZERO,
    }
}

pub fn dealer_with(config: &DealerConfig) -> (MatchDealer, Arc<InMemoryMatchRepo>) {
    let repo = Arc::new(InMemoryMatchRepo::new());
    let dealer = MatchDealer::new(repo.clone(), config);
    (dealer, repo)
}

/// Two players, first to move, fresh board.
pub async fn started_match(dealer: &MatchDealer) -> (Match, PlayerId, PlayerId) {
    let (waiting, p1) = dealer.join_match().await.expect("first join");
    assert_eq!(waiting.p2, None, "another match was already waiting");
    let (started, p2) = dealer.join_match().await.expect("second join");
    assert_eq!(started.p1, p1);
    (started, p1, p2)
}

/// Store a running match with a hand-picked board, `p1` to move.
pub async fn seeded_match(repo: &InMemoryMatchRepo, first: Row, second: Row) -> Match {
    let p1 = PlayerId::new();
    let seeded = Match {
        id: MatchId::new(),
        board: Board::from_rows(first, second),
        p1,
        p2: Some(PlayerId::new()),
        turn: Some(p1),
    };
    repo.save(&seeded).await.expect("seed match");
    seeded
}

/// Wait for the pipeline to settle the move on `match_id`.
pub async fn settled(
    reports: &mut broadcast::Receiver<MoveReport>,
    match_id: MatchId,
) -> Result<Match, DomainError> {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let report = reports.recv().await.expect("pipeline report channel");
            if report.match_id == match_id {
                return report.outcome;
            }
        }
    })
    .await
    .expect("move settled in time")
}
