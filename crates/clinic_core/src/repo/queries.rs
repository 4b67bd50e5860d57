//! Entity-specific queries built on the generic full-scan `find`.

use crate::model::appointment::Appointment;
use crate::model::schema::parse_calendar_date;
use crate::model::treatment::Treatment;
use crate::query::{date_range, field_equals, price_range};
use crate::repo::error::RepoResult;
use crate::repo::repository::Repository;
use crate::repo::store::RecordStore;
use log::debug;

impl<S: RecordStore> Repository<'_, Appointment, S> {
    /// Appointments referencing `patient_id`. The id is not checked for existence.
    pub fn by_patient(&self, patient_id: &str) -> RepoResult<Vec<Appointment>> {
        let matched = self.find(field_equals(
            |appointment: &Appointment| appointment.patient_id.as_str(),
            patient_id,
        ))?;
        debug!(
            "event=record_query module=repo kind=appointment filter=patient matched={}",
            matched.len()
        );
        Ok(matched)
    }

    /// Appointments referencing `therapist_id`. The id is not checked for existence.
    pub fn by_therapist(&self, therapist_id: &str) -> RepoResult<Vec<Appointment>> {
        let matched = self.find(field_equals(
            |appointment: &Appointment| appointment.therapist_id.as_str(),
            therapist_id,
        ))?;
        debug!(
            "event=record_query module=repo kind=appointment filter=therapist matched={}",
            matched.len()
        );
        Ok(matched)
    }

    /// Appointments whose calendar date lies in `[start_date, end_date]`.
    ///
    /// # Errors
    /// - `Validation` when either bound is not a calendar date.
    pub fn by_date_range(&self, start_date: &str, end_date: &str) -> RepoResult<Vec<Appointment>> {
        let range = date_range(start_date, end_date)?;
        let matched = self.find(|appointment| {
            parse_calendar_date(&appointment.date).is_some_and(|date| range.contains(&date))
        })?;
        debug!(
            "event=record_query module=repo kind=appointment filter=date_range matched={}",
            matched.len()
        );
        Ok(matched)
    }
}

impl<S: RecordStore> Repository<'_, Treatment, S> {
    /// Treatments priced within `[min_price, max_price]`.
    ///
    /// # Errors
    /// - `Validation` when either bound is NaN.
    pub fn by_price_range(&self, min_price: f64, max_price: f64) -> RepoResult<Vec<Treatment>> {
        let range = price_range(min_price, max_price)?;
        let matched = self.find(|treatment| range.contains(&treatment.price))?;
        debug!(
            "event=record_query module=repo kind=treatment filter=price_range matched={}",
            matched.len()
        );
        Ok(matched)
    }
}
