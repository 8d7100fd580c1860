#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Erreurs de construction des entités (données invalides refusées à la source).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("ids must be positive integers")]
    InvalidId,
    #[error("start hour must be within 0..=23, got {0}")]
    InvalidStartHour(u8),
    #[error("shift duration must be at least one hour")]
    InvalidDuration,
    #[error("shift duration must not exceed {max}h, got {0}h", max = MAX_SHIFT_HOURS)]
    DurationTooLong(u32),
    #[error("a shift requires at least one worker")]
    InvalidHeadcount,
    #[error("unknown day: {0}")]
    UnknownDay(String),
    #[error("duplicate worker id: {0}")]
    DuplicateWorker(WorkerId),
    #[error("duplicate shift id: {0}")]
    DuplicateShift(ShiftId),
}

/// Durée maximale d'un créneau : une semaine.
pub const MAX_SHIFT_HOURS: u32 = 7 * 24;

/// Jour de la semaine, lundi en premier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Rang dans la semaine : lundi = 1 … dimanche = 7.
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| d.as_str() == lower || (lower.len() == 3 && d.as_str().starts_with(&lower)))
            .ok_or_else(|| ModelError::UnknownDay(s.to_string()))
    }
}

impl From<chrono::Weekday> for Day {
    fn from(w: chrono::Weekday) -> Self {
        Day::ALL[w.num_days_from_monday() as usize]
    }
}

impl From<Day> for chrono::Weekday {
    fn from(d: Day) -> Self {
        match d {
            Day::Monday => chrono::Weekday::Mon,
            Day::Tuesday => chrono::Weekday::Tue,
            Day::Wednesday => chrono::Weekday::Wed,
            Day::Thursday => chrono::Weekday::Thu,
            Day::Friday => chrono::Weekday::Fri,
            Day::Saturday => chrono::Weekday::Sat,
            Day::Sunday => chrono::Weekday::Sun,
        }
    }
}

/// Identifiant fort pour Worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct WorkerId(u32);

impl WorkerId {
    pub fn new(id: u32) -> Result<Self, ModelError> {
        if id == 0 {
            return Err(ModelError::InvalidId);
        }
        Ok(Self(id))
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for WorkerId {
    type Error = ModelError;
    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<WorkerId> for u32 {
    fn from(id: WorkerId) -> Self {
        id.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct ShiftId(u32);

impl ShiftId {
    pub fn new(id: u32) -> Result<Self, ModelError> {
        if id == 0 {
            return Err(ModelError::InvalidId);
        }
        Ok(Self(id))
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ShiftId {
    type Error = ModelError;
    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ShiftId> for u32 {
    fn from(id: ShiftId) -> Self {
        id.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Employé et ses contraintes. Immuable une fois construit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawWorker"))]
pub struct Worker {
    id: WorkerId,
    name: String,
    max_hours_per_week: u32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "BTreeSet::is_empty"))]
    unavailable_days: BTreeSet<Day>,
}

impl Worker {
    pub fn new<N: Into<String>, D: IntoIterator<Item = Day>>(
        id: u32,
        name: N,
        max_hours_per_week: u32,
        unavailable_days: D,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            id: WorkerId::new(id)?,
            name: name.into(),
            max_hours_per_week,
            unavailable_days: unavailable_days.into_iter().collect(),
        })
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn max_hours_per_week(&self) -> u32 {
        self.max_hours_per_week
    }
    pub fn unavailable_days(&self) -> &BTreeSet<Day> {
        &self.unavailable_days
    }

    pub fn is_available(&self, day: Day) -> bool {
        !self.unavailable_days.contains(&day)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawWorker {
    id: u32,
    name: String,
    max_hours_per_week: u32,
    #[serde(default)]
    unavailable_days: Vec<Day>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWorker> for Worker {
    type Error = ModelError;
    fn try_from(raw: RawWorker) -> Result<Self, Self::Error> {
        Worker::new(raw.id, raw.name, raw.max_hours_per_week, raw.unavailable_days)
    }
}

/// Créneau hebdomadaire : jour, heure de début, durée, effectif requis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawShift"))]
pub struct Shift {
    id: ShiftId,
    day: Day,
    start_hour: u8,
    duration_hours: u32,
    required_workers: u32,
}

impl Shift {
    /// Crée un shift en validant heure de début, durée et effectif.
    pub fn new(
        id: u32,
        day: Day,
        start_hour: u8,
        duration_hours: u32,
        required_workers: u32,
    ) -> Result<Self, ModelError> {
        let id = ShiftId::new(id)?;
        if start_hour > 23 {
            return Err(ModelError::InvalidStartHour(start_hour));
        }
        if duration_hours == 0 {
            return Err(ModelError::InvalidDuration);
        }
        if duration_hours > MAX_SHIFT_HOURS {
            return Err(ModelError::DurationTooLong(duration_hours));
        }
        if required_workers == 0 {
            return Err(ModelError::InvalidHeadcount);
        }
        Ok(Self {
            id,
            day,
            start_hour,
            duration_hours,
            required_workers,
        })
    }

    pub fn id(&self) -> ShiftId {
        self.id
    }
    pub fn day(&self) -> Day {
        self.day
    }
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }
    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }
    pub fn required_workers(&self) -> u32 {
        self.required_workers
    }

    /// Heure de fin ; peut dépasser 24 (le créneau ne bascule pas sur le jour suivant).
    pub fn end_hour(&self) -> u32 {
        u32::from(self.start_hour) + self.duration_hours
    }

    /// Chevauchement semi-ouvert, uniquement entre créneaux du même jour.
    pub fn overlaps_with(&self, other: &Shift) -> bool {
        if self.day != other.day {
            return false;
        }
        u32::from(self.start_hour) < other.end_hour()
            && u32::from(other.start_hour) < self.end_hour()
    }

    /// Clé de tri du moteur : (jour, heure de début), puis id pour stabilité.
    pub(crate) fn week_order(&self) -> (u8, u8, ShiftId) {
        (self.day.ordinal(), self.start_hour, self.id)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawShift {
    id: u32,
    day: Day,
    start_hour: u8,
    duration_hours: u32,
    required_workers: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawShift> for Shift {
    type Error = ModelError;
    fn try_from(raw: RawShift) -> Result<Self, Self::Error> {
        Shift::new(
            raw.id,
            raw.day,
            raw.start_hour,
            raw.duration_hours,
            raw.required_workers,
        )
    }
}

/// Roster complet : employés et créneaux, ids uniques.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRoster"))]
pub struct Roster {
    workers: Vec<Worker>,
    shifts: Vec<Shift>,
}

impl Roster {
    pub fn new(workers: Vec<Worker>, shifts: Vec<Shift>) -> Result<Self, ModelError> {
        let mut seen = HashSet::new();
        for w in &workers {
            if !seen.insert(w.id()) {
                return Err(ModelError::DuplicateWorker(w.id()));
            }
        }
        let mut seen = HashSet::new();
        for s in &shifts {
            if !seen.insert(s.id()) {
                return Err(ModelError::DuplicateShift(s.id()));
            }
        }
        Ok(Self { workers, shifts })
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }
    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn find_worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id() == id)
    }
    pub fn find_shift(&self, id: ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id() == id)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRoster {
    #[serde(default)]
    workers: Vec<Worker>,
    #[serde(default)]
    shifts: Vec<Shift>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRoster> for Roster {
    type Error = ModelError;
    fn try_from(raw: RawRoster) -> Result<Self, Self::Error> {
        Roster::new(raw.workers, raw.shifts)
    }
}
