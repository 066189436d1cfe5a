use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime, Timelike};
use uuid::Uuid;

use crate::models::Appointment;

/// Two-level day-view lookup: professional → HH:MM slot → appointments that
/// start in that slot, in input order. The civil date and slot key are read
/// from `starts_at` in its stored offset; nothing here converts timezones.
#[derive(Debug, Default)]
pub struct SlotIndex<'a> {
    map: HashMap<Uuid, BTreeMap<NaiveTime, Vec<&'a Appointment>>>,
    indexed: usize,
}

impl<'a> SlotIndex<'a> {
    /// Buckets the appointments whose `starts_at` falls on `date`.
    /// Appointments on other dates are silently skipped.
    pub fn build(appointments: &'a [Appointment], date: NaiveDate) -> Self {
        let mut index = SlotIndex::default();
        for appointment in appointments {
            if appointment.starts_at.date_naive() != date {
                continue;
            }
            let slot = slot_key(appointment);
            index
                .map
                .entry(appointment.professional_id)
                .or_default()
                .entry(slot)
                .or_default()
                .push(appointment);
            index.indexed += 1;
        }
        index
    }

    pub fn for_professional(
        &self,
        professional_id: Uuid,
    ) -> Option<&BTreeMap<NaiveTime, Vec<&'a Appointment>>> {
        self.map.get(&professional_id)
    }

    pub fn at(&self, professional_id: Uuid, slot: NaiveTime) -> &[&'a Appointment] {
        self.map
            .get(&professional_id)
            .and_then(|slots| slots.get(&slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn professionals(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.map.keys().copied()
    }

    /// Number of appointments that landed in the index.
    pub fn len(&self) -> usize {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.indexed == 0
    }
}

/// Slot key of an appointment: the HH:MM its `starts_at` reads in the studio
/// offset, seconds dropped.
pub fn slot_key(appointment: &Appointment) -> NaiveTime {
    let time = appointment.starts_at.time();
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Ids of every appointment that shares a professional with another one and
/// overlaps it in time. Intervals are half-open: ending exactly when the
/// other starts is not a conflict. Both sides of each overlapping pair end
/// up in the set. The scan is O(n²) over the input, which is a single day's
/// worth of appointments in practice; callers filter by date beforehand.
pub fn detect_overlaps(appointments: &[Appointment]) -> HashSet<Uuid> {
    let mut overlaps = HashSet::new();

    for (i, a) in appointments.iter().enumerate() {
        for b in &appointments[i + 1..] {
            if a.professional_id != b.professional_id {
                continue;
            }
            if a.starts_at < b.ends_at && b.starts_at < a.ends_at {
                overlaps.insert(a.id);
                overlaps.insert(b.id);
            }
        }
    }

    overlaps
}
