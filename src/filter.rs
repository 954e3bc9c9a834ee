//! Search and categorical filtering over record collections.
//!
//! One engine for all four list views: a record is kept when the query
//! matches any of its searchable fields (case-insensitive substring) and
//! every set categorical filter equals the record's field. `None` filters
//! are wildcards. Results borrow from the input and keep its order.

use chrono::NaiveDate;

use crate::models::{
    Appointment, AppointmentFilter, InventoryFilter, InventoryItem, Patient, PatientFilter,
    StaffFilter, StaffMember,
};
use crate::store::RecordStore;

/// Sentinel the list views send for "no filter".
pub const WILDCARD: &str = "all";

/// Parse a categorical filter value, mapping [`WILDCARD`] (or blank) to `None`.
pub fn parse_filter<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, T::Err> {
    let raw = raw.trim();
    if raw.is_empty() || raw == WILDCARD {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}

/// Case-insensitive substring match of `query` against any of `fields`.
/// A blank query matches everything.
pub fn matches_query<S: AsRef<str>>(query: &str, fields: &[S]) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.as_ref().to_lowercase().contains(&needle))
}

fn matches_choice<T: PartialEq>(filter: &Option<T>, value: &T) -> bool {
    filter.as_ref().map_or(true, |wanted| wanted == value)
}

// ═══════════════════════════════════════════════════════════
// Predicate trait
// ═══════════════════════════════════════════════════════════

/// A filter that can decide on one record of kind `T`.
///
/// `Ctx` carries whatever the predicate needs beyond the record itself:
/// the store for appointment name resolution, the day for inventory status.
pub trait RecordFilter<T> {
    type Ctx<'c>: Copy;

    fn matches(&self, record: &T, ctx: Self::Ctx<'_>) -> bool;

    /// Order-preserving, non-destructive filtering. Feeding the output back
    /// in with the same filter returns it unchanged.
    fn apply<'a, I>(&self, records: I, ctx: Self::Ctx<'_>) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record, ctx))
            .collect()
    }
}

impl RecordFilter<Patient> for PatientFilter {
    type Ctx<'c> = ();

    fn matches(&self, patient: &Patient, _: ()) -> bool {
        matches_query(&self.query, &[&patient.name, &patient.email, &patient.phone])
            && matches_choice(&self.status, &patient.status)
    }
}

impl RecordFilter<Appointment> for AppointmentFilter {
    type Ctx<'c> = &'c RecordStore;

    fn matches(&self, appointment: &Appointment, store: &RecordStore) -> bool {
        matches_query(
            &self.query,
            &[
                store.patient_name(appointment.patient_id),
                store.doctor_name(appointment.doctor_id),
                appointment.appointment_type.as_str(),
            ],
        ) && matches_choice(&self.status, &appointment.status)
            && matches_choice(&self.date, &appointment.date)
    }
}

impl RecordFilter<StaffMember> for StaffFilter {
    type Ctx<'c> = ();

    fn matches(&self, member: &StaffMember, _: ()) -> bool {
        matches_query(&self.query, &[&member.name, &member.email, &member.department])
            && matches_choice(&self.department, &member.department)
            && matches_choice(&self.role, &member.role)
    }
}

impl RecordFilter<InventoryItem> for InventoryFilter {
    type Ctx<'c> = NaiveDate;

    fn matches(&self, item: &InventoryItem, today: NaiveDate) -> bool {
        matches_query(&self.query, &[&item.name, &item.supplier, &item.location])
            && matches_choice(&self.category, &item.category)
            && matches_choice(&self.status, &item.status(today))
    }
}
