//! Age range to birth-date window conversion.

use chrono::{Months, NaiveDate};

use census_core::{DomainError, DomainResult};

/// Inclusive birth-date range `[from, to]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BirthDateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl BirthDateWindow {
    /// Window of birth dates for persons aged `min_age..=max_age` on `today`.
    ///
    /// Both bounds are derived from the same `today`. Feb 29 clamps to Feb 28 in
    /// non-leap target years.
    pub fn for_ages(today: NaiveDate, min_age: u32, max_age: u32) -> DomainResult<Self> {
        Ok(Self {
            from: years_before(today, max_age)?,
            to: years_before(today, min_age)?,
        })
    }

    /// An inverted window (`from > to`) matches nothing.
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

fn years_before(today: NaiveDate, years: u32) -> DomainResult<NaiveDate> {
    years
        .checked_mul(12)
        .and_then(|months| today.checked_sub_months(Months::new(months)))
        .ok_or_else(|| DomainError::validation(format!("age {years} is out of range")))
}
