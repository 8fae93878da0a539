/// Month calendar model
///
/// Holds the arithmetic behind a Sunday-first month grid: how many blank
/// cells precede the 1st, how many days the month has, and which cell is today.

use chrono::{Datelike, Months, NaiveDate};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
    today: NaiveDate,
}

impl MonthView {
    /// Build the view for a year and month (1-12)
    pub fn new(year: i32, month: u32, today: NaiveDate) -> Result<Self, DomainError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            DomainError::InvalidArgument(format!("No such month: {}-{:02}", year, month))
        })?;
        Ok(Self { first, today })
    }

    /// The month containing `today`
    pub fn current(today: NaiveDate) -> Self {
        Self {
            first: today.with_day(1).unwrap_or(today),
            today,
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Heading such as "June 2024"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // Only reachable for the last representable month
            None => 31,
        }
    }

    /// Blank cells before the 1st in a grid whose columns start on Sunday
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn is_today(&self, day: u32) -> bool {
        self.first.year() == self.today.year()
            && self.first.month() == self.today.month()
            && day == self.today.day()
    }

    /// Resolve a day number in this month to its calendar date
    pub fn date(&self, day: u32) -> Result<NaiveDate, DomainError> {
        if day == 0 || day > self.days_in_month() {
            return Err(DomainError::InvalidArgument(format!(
                "{} has no day {}",
                self.title(),
                day
            )));
        }
        self.first
            .with_day(day)
            .ok_or_else(|| DomainError::InvalidDate(format!("{} has no day {}", self.title(), day)))
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
            today: self.today,
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
            today: self.today,
        }
    }

    /// Rows of seven cells; `None` marks a blank cell
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let cells: Vec<Option<u32>> = std::iter::repeat(None)
            .take(self.leading_blanks() as usize)
            .chain((1..=self.days_in_month()).map(Some))
            .collect();

        cells
            .chunks(7)
            .map(|chunk| {
                let mut row = [None; 7];
                row[..chunk.len()].copy_from_slice(chunk);
                row
            })
            .collect()
    }
}
