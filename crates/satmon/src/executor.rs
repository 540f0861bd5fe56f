//! Carrying out (or just reporting) a move decision.

use crate::error::Result;
use crate::fs::Filesystem;
use crate::schedule::MoveDecision;
use crate::scope::Candidate;
use serde::Serialize;
use tracing::{debug, info};

/// What happened to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveAction {
    Moved,
    WouldMove,
    Skipped,
}

/// Performs guarded moves and remembers whether any happened this run.
#[derive(Debug, Clone)]
pub struct MoveExecutor {
    dry_run: bool,
    moved: bool,
}

impl MoveExecutor {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            moved: false,
        }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// True once any candidate was moved (or would have been, in a dry run).
    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn execute<F: Filesystem + ?Sized>(
        &mut self,
        fs: &F,
        candidate: &Candidate,
        decision: &MoveDecision,
    ) -> Result<MoveAction> {
        if !decision.should_move() {
            debug!(
                "Not moving '{}': {}",
                candidate.source.display(),
                decision.reason()
            );
            return Ok(MoveAction::Skipped);
        }

        info!(
            "Moving '{}' to '{}'...",
            candidate.source.display(),
            candidate.destination.display()
        );
        info!(" - Reason: {}", decision.reason());

        let action = if self.dry_run {
            info!("   (not really... this is a dry run)");
            MoveAction::WouldMove
        } else {
            fs.relocate(&candidate.source, &candidate.destination)?;
            MoveAction::Moved
        };
        self.moved = true;
        Ok(action)
    }
}
