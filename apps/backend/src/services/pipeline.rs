//! Asynchronous move pipeline.
//!
//! Two pools of lanes. A lane is one tokio task draining its own unbounded
//! channel:
//!
//! - sowing lanes run [`sowing::apply`] and either re-enqueue a continuation
//!   on their own channel or hand the finished move to a completion lane;
//! - completion lanes settle the turn and persist the match.
//!
//! Events are routed by `xxh3(match id) % lanes`, so all sub-moves of one
//! match go through the same sowing lane and the same completion lane in
//! causal order, while different matches run in parallel.
//!
//! The in-flight set holds every match with a move between `claim` and the
//! completion stage's save attempt. Each settled move is published as a
//! [`MoveReport`].

use std::sync::Arc;

use dashmap::DashSet;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::dealer::DealerConfig;
use crate::domain::sowing::{self, Landing, SowOutcome};
use crate::domain::state::{Match, MatchId};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::SharedMatchRepo;

const REPORT_CAPACITY: usize = 1024;

/// One unit of sowing work: a pit plus the match as it stood when the event
/// was created.
#[derive(Debug, Clone)]
pub struct MoveEvent {
    pub pit: usize,
    pub snapshot: Match,
    /// Sub-moves already applied for this logical move.
    pub depth: u32,
}

/// Final word on one logical move.
#[derive(Debug, Clone)]
pub struct MoveReport {
    pub match_id: MatchId,
    /// The persisted match, or why the move was dropped.
    pub outcome: Result<Match, DomainError>,
}

#[derive(Debug)]
struct CompletedMove {
    snapshot: Match,
    landing: Landing,
}

struct Shared {
    repo: SharedMatchRepo,
    in_flight: DashSet<MatchId>,
    reports: broadcast::Sender<MoveReport>,
}

impl Shared {
    fn settle(&self, match_id: MatchId, outcome: Result<Match, DomainError>) {
        self.in_flight.remove(&match_id);
        // No subscribers is fine.
        let _ = self.reports.send(MoveReport { match_id, outcome });
    }
}

fn lane_for(match_id: MatchId, lanes: usize) -> usize {
    (xxh3_64(match_id.0.as_bytes()) % lanes as u64) as usize
}

/// Apply the turn rules to a finished move.
///
/// - either side out of stones: game over, nobody holds the turn
/// - last stone in the mover's store: the mover plays again
/// - otherwise the turn passes to the opponent
pub fn conclude_move(snapshot: &mut Match, landing: Landing) {
    if snapshot.board.is_finished() {
        snapshot.turn = None;
    } else if !landing.grants_extra_turn() {
        snapshot.pass_turn();
    }
}

pub struct MovePipeline {
    sow_lanes: Vec<mpsc::UnboundedSender<MoveEvent>>,
    shared: Arc<Shared>,
}

impl MovePipeline {
    /// Spawn the sowing and completion lanes. Must run inside a tokio runtime.
    pub fn start(repo: SharedMatchRepo, config: &DealerConfig) -> Self {
        let (reports, _) = broadcast::channel(REPORT_CAPACITY);
        let shared = Arc::new(Shared {
            repo,
            in_flight: DashSet::new(),
            reports,
        });

        let completion_workers = config.completion_workers.max(1);
        let mut completion_lanes = Vec::with_capacity(completion_workers);
        for lane in 0..completion_workers {
            let (tx, rx) = mpsc::unbounded_channel();
            completion_lanes.push(tx);
            tokio::spawn(run_completion_lane(lane, rx, shared.clone()));
        }
        let completion_lanes: Arc<[mpsc::UnboundedSender<CompletedMove>]> =
            completion_lanes.into();

        let sow_workers = config.sow_workers.max(1);
        let mut sow_lanes = Vec::with_capacity(sow_workers);
        for lane in 0..sow_workers {
            let (tx, rx) = mpsc::unbounded_channel();
            let own = tx.downgrade();
            sow_lanes.push(tx);
            tokio::spawn(run_sow_lane(
                lane,
                rx,
                own,
                completion_lanes.clone(),
                shared.clone(),
            ));
        }

        info!(sow_workers, completion_workers, "Move pipeline started");

        Self { sow_lanes, shared }
    }

    /// Mark `match_id` as having a move in flight. False if it already has one.
    pub fn claim(&self, match_id: MatchId) -> bool {
        self.shared.in_flight.insert(match_id)
    }

    /// Drop a claim that never turned into a submitted move.
    pub fn release(&self, match_id: MatchId) {
        self.shared.in_flight.remove(&match_id);
    }

    pub fn is_in_flight(&self, match_id: MatchId) -> bool {
        self.shared.in_flight.contains(&match_id)
    }

    /// Enqueue the first sub-move of a claimed match. Returns once queued.
    pub fn submit(&self, pit: usize, snapshot: Match) -> Result<(), DomainError> {
        let match_id = snapshot.id;
        let lane = lane_for(match_id, self.sow_lanes.len());
        let event = MoveEvent {
            pit,
            snapshot,
            depth: 0,
        };

        if self.sow_lanes[lane].send(event).is_err() {
            self.release(match_id);
            return Err(DomainError::infra(
                InfraErrorKind::PersistenceFailure,
                format!("sowing lane {lane} is closed"),
            ));
        }

        debug!(%match_id, pit, lane, "Move enqueued");
        Ok(())
    }

    /// Receive a [`MoveReport`] for every move settled from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<MoveReport> {
        self.shared.reports.subscribe()
    }
}

async fn run_sow_lane(
    lane: usize,
    mut rx: mpsc::UnboundedReceiver<MoveEvent>,
    own: mpsc::WeakUnboundedSender<MoveEvent>,
    completions: Arc<[mpsc::UnboundedSender<CompletedMove>]>,
    shared: Arc<Shared>,
) {
    while let Some(MoveEvent {
        pit,
        snapshot,
        depth,
    }) = rx.recv().await
    {
        let match_id = snapshot.id;
        let chain_limit = snapshot.board.total_stones();

        match sowing::apply(pit, snapshot) {
            Ok(SowOutcome::Continue { pit, snapshot }) => {
                let depth = depth + 1;
                if depth > chain_limit {
                    error!(%match_id, depth, lane, "Sub-move chain exceeded stones on board");
                    shared.settle(
                        match_id,
                        Err(DomainError::infra(
                            InfraErrorKind::ChainLimit,
                            format!("chain of {depth} sub-moves on match {match_id}"),
                        )),
                    );
                    continue;
                }

                debug!(%match_id, pit, depth, lane, "Move continues");
                let next = MoveEvent {
                    pit,
                    snapshot,
                    depth,
                };
                let requeued = own.upgrade().map(|tx| tx.send(next).is_ok());
                if requeued != Some(true) {
                    warn!(%match_id, lane, "Pipeline shut down mid-move, dropping move");
                    shared.settle(
                        match_id,
                        Err(DomainError::persistence("pipeline shut down mid-move")),
                    );
                }
            }
            Ok(SowOutcome::Complete { snapshot, landing }) => {
                debug!(%match_id, ?landing, depth, lane, "Move sown");
                let target = lane_for(match_id, completions.len());
                if completions[target]
                    .send(CompletedMove { snapshot, landing })
                    .is_err()
                {
                    warn!(%match_id, lane = target, "Completion lane closed, dropping move");
                    shared.settle(
                        match_id,
                        Err(DomainError::persistence("completion lane closed")),
                    );
                }
            }
            Err(err) => {
                warn!(%match_id, pit, error = %err, "Rejected sub-move");
                shared.settle(match_id, Err(err));
            }
        }
    }

    debug!(lane, "Sowing lane stopped");
}

async fn run_completion_lane(
    lane: usize,
    mut rx: mpsc::UnboundedReceiver<CompletedMove>,
    shared: Arc<Shared>,
) {
    while let Some(CompletedMove {
        mut snapshot,
        landing,
    }) = rx.recv().await
    {
        let match_id = snapshot.id;
        conclude_move(&mut snapshot, landing);

        let outcome = match shared.repo.save(&snapshot).await {
            Ok(()) => {
                info!(
                    %match_id,
                    ?landing,
                    turn = ?snapshot.turn,
                    lane,
                    "Move persisted"
                );
                Ok(snapshot)
            }
            Err(err) => {
                error!(%match_id, lane, error = %err, "Failed to persist move");
                Err(err)
            }
        };

        shared.settle(match_id, outcome);
    }

    debug!(lane, "Completion lane stopped");
}
