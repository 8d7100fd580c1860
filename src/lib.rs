#![forbid(unsafe_code)]
//! Equipe — affectation d'employés à des créneaux hebdomadaires (sans BD).
//!
//! - Remplissage glouton, une passe, sans retour arrière.
//! - Contraintes : jours indisponibles, plafond d'heures, chevauchements.
//! - Échanges validés, tout ou rien.
//! - Stockage fichiers (JSON/CSV) derrière la feature `serde`.

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{Day, ModelError, Roster, Shift, ShiftId, Worker, WorkerId};
pub use scheduler::{
    assign_shifts, detect_conflicts, swap, swap_in_place, Assignment, Conflict, ConflictKind,
    Ledger, Rejection, SchedError, Scheduler, Shortfall, SwapError, SwapReport,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Plan, Storage};
