use crate::model::{Day, ModelError, ShiftId, WorkerId};
use std::fmt;
use thiserror::Error;

/// Raison pour laquelle un employé ne peut pas prendre un créneau.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("unavailable day: worker {worker} does not work on {day}")]
    UnavailableDay { worker: WorkerId, day: Day },
    #[error("hour cap exceeded: worker {worker} has {remaining}h left of {cap}h, shift needs {requested}h")]
    HourCapExceeded {
        worker: WorkerId,
        cap: u32,
        remaining: i64,
        requested: u32,
    },
    #[error("time overlap: shift {shift} overlaps shift {conflicting} held by worker {worker}")]
    TimeOverlap {
        worker: WorkerId,
        shift: ShiftId,
        conflicting: ShiftId,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("unknown shift: {0}")]
    UnknownShift(ShiftId),
    #[error("unknown worker: {0}")]
    UnknownWorker(WorkerId),
    #[error("worker {worker} not assigned to shift {shift}")]
    NotAssigned { worker: WorkerId, shift: ShiftId },
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("swap invalid: {0}")]
    SwapInvalid(#[from] SwapError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    UnavailableDay,
    HourCapExceeded,
    Overlap,
    UnknownReference,
    OverStaffed,
}

impl ConflictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::UnavailableDay => "unavailable",
            ConflictKind::HourCapExceeded => "hour-cap",
            ConflictKind::Overlap => "overlap",
            ConflictKind::UnknownReference => "unknown",
            ConflictKind::OverStaffed => "overstaffed",
        }
    }
}

/// Incohérence relevée sur un ledger existant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub worker: Option<WorkerId>,
    pub shifts: Vec<ShiftId>,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.as_str())?;
        if let Some(worker) = self.worker {
            write!(f, " worker {worker}")?;
        }
        let shifts: Vec<String> = self.shifts.iter().map(ShiftId::to_string).collect();
        write!(f, " shifts [{}]", shifts.join(", "))
    }
}
