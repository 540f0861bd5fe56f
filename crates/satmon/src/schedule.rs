//! Deciding whether today is a moving day.

use crate::config::EffectiveOptions;
use crate::error::{Result, SatmonError};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::path::Path;

/// Day names indexed by days from Sunday.
pub const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Outcome of evaluating a schedule against the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum MoveDecision {
    Move { reason: String },
    Skip { reason: String },
}

impl MoveDecision {
    pub fn should_move(&self) -> bool {
        matches!(self, MoveDecision::Move { .. })
    }

    pub fn reason(&self) -> &str {
        match self {
            MoveDecision::Move { reason } | MoveDecision::Skip { reason } => reason,
        }
    }
}

type Rule = fn(&str, usize) -> Option<MoveDecision>;

// Independent checks; when more than one matches, the last one wins.
const RULES: [Rule; 3] = [daily_rule, weekday_rule, day_name_rule];

fn daily_rule(schedule: &str, _weekday: usize) -> Option<MoveDecision> {
    (schedule == "daily").then(|| MoveDecision::Move {
        reason: "the schedule is daily.".to_string(),
    })
}

fn weekday_rule(schedule: &str, weekday: usize) -> Option<MoveDecision> {
    if schedule != "weekday" {
        return None;
    }
    Some(if (1..=5).contains(&weekday) {
        MoveDecision::Move {
            reason: "today is a weekday".to_string(),
        }
    } else {
        MoveDecision::Skip {
            reason: "today is not a weekday".to_string(),
        }
    })
}

fn day_name_rule(schedule: &str, weekday: usize) -> Option<MoveDecision> {
    let scheduled = DAY_NAMES.iter().position(|day| *day == schedule)?;
    let today = DAY_NAMES[weekday];
    Some(if scheduled == weekday {
        MoveDecision::Move {
            reason: format!("today is a {today}"),
        }
    } else {
        MoveDecision::Skip {
            reason: format!("today is not a {schedule} (it's a {today})"),
        }
    })
}

/// Evaluate the schedule in `options` for `date`.
///
/// `scope` only feeds the "no schedule" error message.
pub fn evaluate(options: &EffectiveOptions, date: NaiveDate, scope: &Path) -> Result<MoveDecision> {
    let schedule = options
        .schedule()
        .ok_or_else(|| SatmonError::NoSchedule(scope.to_path_buf()))?;
    let weekday = date.weekday().num_days_from_sunday() as usize;

    RULES
        .iter()
        .fold(None, |decision, rule| rule(schedule, weekday).or(decision))
        .ok_or_else(|| SatmonError::UnknownSchedule(schedule.to_string()))
}
