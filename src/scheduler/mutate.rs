use super::{
    constraints::{self, ShiftCatalogue},
    ledger::Ledger,
    types::SwapError,
};
use crate::model::{Shift, ShiftId, Worker, WorkerId};
use tracing::info;

/// Résultat d'un échange, tel que présenté à l'appelant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReport {
    pub success: bool,
    pub message: String,
    /// Présent uniquement en cas de succès.
    pub updated_ledger: Option<Ledger>,
}

/// `taker` reprend `shift` à `holder`. Toutes les vérifications précèdent la
/// moindre écriture : en cas d'échec le ledger est intact.
pub(super) fn swap_in_place(
    ledger: &mut Ledger,
    taker: WorkerId,
    holder: WorkerId,
    shift_id: ShiftId,
    workers: &[Worker],
    shifts: &[Shift],
) -> Result<(), SwapError> {
    let shift = shifts
        .iter()
        .find(|s| s.id() == shift_id)
        .ok_or(SwapError::UnknownShift(shift_id))?;
    let taker_worker = find_worker(workers, taker)?;
    find_worker(workers, holder)?;

    if !ledger.contains(holder, shift_id) {
        return Err(SwapError::NotAssigned {
            worker: holder,
            shift: shift_id,
        });
    }

    let catalogue = ShiftCatalogue::new(shifts);
    constraints::can_assign_excluding_target(taker_worker, shift, ledger, &catalogue)?;

    ledger.unassign(holder, shift_id);
    ledger.assign(taker, shift_id);
    Ok(())
}

pub(super) fn swap(
    ledger: &Ledger,
    taker: WorkerId,
    holder: WorkerId,
    shift_id: ShiftId,
    workers: &[Worker],
    shifts: &[Shift],
) -> SwapReport {
    let mut updated = ledger.clone();
    match swap_in_place(&mut updated, taker, holder, shift_id, workers, shifts) {
        Ok(()) => {
            info!(shift = %shift_id, %taker, %holder, "swap applied");
            SwapReport {
                success: true,
                message: format!("worker {taker} now holds shift {shift_id} (was worker {holder})"),
                updated_ledger: Some(updated),
            }
        }
        Err(err) => {
            info!(shift = %shift_id, %taker, %holder, reason = %err, "swap rejected");
            SwapReport {
                success: false,
                message: err.to_string(),
                updated_ledger: None,
            }
        }
    }
}

fn find_worker(workers: &[Worker], id: WorkerId) -> Result<&Worker, SwapError> {
    workers
        .iter()
        .find(|w| w.id() == id)
        .ok_or(SwapError::UnknownWorker(id))
}
