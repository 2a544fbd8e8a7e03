//! Attendance store keyed by employee, then date.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::AttendanceEntry;

use super::AttendanceLookup;

/// Two-level attendance table: employee number → date → entry.
///
/// Each employee has at most one entry per date. Inserting a second entry
/// for the same (employee, date) pair replaces the first (last write wins).
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceEntry;
/// use payroll_engine::store::{AttendanceLookup, AttendanceStore};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
/// let entry = |h| AttendanceEntry {
///     employee_id: "10003".to_string(),
///     date,
///     login: NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
///     logout: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// };
///
/// let mut store = AttendanceStore::new();
/// store.insert(entry(9));
/// let previous = store.insert(entry(8));
///
/// assert_eq!(previous.unwrap().login, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
/// assert_eq!(store.entries_in_range("10003", date, date)[0].login.to_string(), "08:00:00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceStore {
    entries: HashMap<String, BTreeMap<NaiveDate, AttendanceEntry>>,
}

impl AttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry, returning the entry it overwrote for the same
    /// employee and date, if any.
    pub fn insert(&mut self, entry: AttendanceEntry) -> Option<AttendanceEntry> {
        self.entries
            .entry(entry.employee_id.clone())
            .or_default()
            .insert(entry.date, entry)
    }

    /// Returns the total number of entries across all employees.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }
}

impl AttendanceLookup for AttendanceStore {
    fn entries_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<&AttendanceEntry> {
        // BTreeMap::range panics on an inverted range.
        if start > end {
            return Vec::new();
        }

        self.entries
            .get(employee_id)
            .map(|by_date| by_date.range(start..=end).map(|(_, entry)| entry).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<AttendanceEntry> for AttendanceStore {
    fn from_iter<I: IntoIterator<Item = AttendanceEntry>>(iter: I) -> Self {
        let mut store = Self::new();
        for entry in iter {
            store.insert(entry);
        }
        store
    }
}
