use crate::calc::dates::day_key;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// In-memory schedule entries keyed by `%Y-%m-%d`.
///
/// A key is present only while its list is non-empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl ScheduleMap {
    pub fn append(&mut self, day: NaiveDate, text: impl Into<String>) {
        let key = day_key(day);
        let list = self.entries.entry(key.clone()).or_default();
        list.push(text.into());
        tracing::info!(day = %key, count = list.len(), "schedule entry added");
    }

    /// Replaces the entry at `index`. Returns false (and changes nothing)
    /// when the day has no entry at that position.
    pub fn update_at(&mut self, day: NaiveDate, index: usize, text: impl Into<String>) -> bool {
        let key = day_key(day);
        match self.entries.get_mut(&key).and_then(|list| list.get_mut(index)) {
            Some(slot) => {
                *slot = text.into();
                tracing::info!(day = %key, index, "schedule entry updated");
                true
            }
            None => {
                tracing::warn!(day = %key, index, "update ignored: no entry at index");
                false
            }
        }
    }

    /// Removes the entry at `index`, dropping the day once its list is empty.
    pub fn delete_at(&mut self, day: NaiveDate, index: usize) -> bool {
        let key = day_key(day);
        let Some(list) = self.entries.get_mut(&key) else {
            tracing::warn!(day = %key, index, "delete ignored: day has no entries");
            return false;
        };
        if index >= list.len() {
            tracing::warn!(day = %key, index, "delete ignored: no entry at index");
            return false;
        }
        list.remove(index);
        if list.is_empty() {
            self.entries.remove(&key);
        }
        tracing::info!(day = %key, index, "schedule entry deleted");
        true
    }

    pub fn entries(&self, day: NaiveDate) -> &[String] {
        self.entries
            .get(&day_key(day))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn len_days(&self) -> usize {
        self.entries.len()
    }

    pub fn total_entries(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
impl ScheduleMap {
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.entries.contains_key(&day_key(day))
    }
}
