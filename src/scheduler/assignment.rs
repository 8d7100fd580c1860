use super::{
    constraints::{self, ShiftCatalogue},
    ledger::Ledger,
};
use crate::model::{Day, Shift, ShiftId, Worker, WorkerId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

/// Créneau resté en sous-effectif après le remplissage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shortfall {
    pub shift: ShiftId,
    pub day: Day,
    pub start_hour: u8,
    pub assigned: u32,
    pub required: u32,
}

impl Shortfall {
    pub fn missing(&self) -> u32 {
        self.required.saturating_sub(self.assigned)
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shift {} assigned {}, required {} ({} {}:00)",
            self.shift, self.assigned, self.required, self.day, self.start_hour
        )
    }
}

/// Résultat d'un passage du moteur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub ledger: Ledger,
    /// Tous les employés fournis y figurent, à 0 s'ils n'ont rien reçu.
    pub hours_by_worker: BTreeMap<WorkerId, u32>,
    pub warnings: Vec<Shortfall>,
}

impl Assignment {
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Remplissage glouton en une passe, sans retour arrière.
///
/// Les créneaux sont traités par (jour, heure de début) ; pour chacun, les
/// candidats éligibles sont pris par heures cumulées croissantes puis par id,
/// jusqu'à l'effectif requis.
pub(super) fn assign_shifts(workers: &[Worker], shifts: &[Shift]) -> Assignment {
    let catalogue = ShiftCatalogue::new(shifts);
    let mut ledger = Ledger::new();
    let mut hours: BTreeMap<WorkerId, u32> = workers.iter().map(|w| (w.id(), 0)).collect();
    let mut warnings = Vec::new();

    let mut ordered: Vec<&Shift> = shifts.iter().collect();
    ordered.sort_by_key(|s| s.week_order());

    for shift in ordered {
        let mut candidates: Vec<&Worker> = workers
            .iter()
            .filter(|w| match constraints::can_assign(w, shift, &ledger, &catalogue) {
                Ok(()) => true,
                Err(reason) => {
                    debug!(shift = %shift.id(), %reason, "candidate rejected");
                    false
                }
            })
            .collect();
        candidates.sort_by_key(|w| (hours.get(&w.id()).copied().unwrap_or(0), w.id()));

        let required = shift.required_workers() as usize;
        let mut assigned = 0u32;
        for worker in candidates.into_iter().take(required) {
            if ledger.assign(worker.id(), shift.id()) {
                let total = hours.entry(worker.id()).or_insert(0);
                *total = total.saturating_add(shift.duration_hours());
                assigned += 1;
                debug!(shift = %shift.id(), worker = %worker.id(), "assigned");
            }
        }

        if assigned < shift.required_workers() {
            let shortfall = Shortfall {
                shift: shift.id(),
                day: shift.day(),
                start_hour: shift.start_hour(),
                assigned,
                required: shift.required_workers(),
            };
            warn!(%shortfall, "shift under-filled");
            warnings.push(shortfall);
        }
    }

    info!(
        shifts = shifts.len(),
        workers = workers.len(),
        assignments = ledger.len(),
        shortfalls = warnings.len(),
        "assignment run finished"
    );

    Assignment {
        ledger,
        hours_by_worker: hours,
        warnings,
    }
}
