//! Calendar grid generation.
//!
//! Builds the month view the UI renders: a fixed 6-week grid whose cells are
//! annotated with the subscriptions due that day. All date math lives here so
//! clients only handle presentation.

use chrono::{Datelike, NaiveDate};
use shared::{CalendarCell, CalendarMonth, Subscription};

use crate::domain::aggregation;

/// Every month view is exactly six full weeks.
const GRID_CELLS: usize = 42;

/// Calendar service that handles all calendar-related business logic
#[derive(Clone)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Generate a 42-cell month grid with per-day subscription annotations.
    ///
    /// Cells are row-major, Monday-first, chronological. Leading cells carry
    /// the previous month's tail days and trailing cells the next month's
    /// head days, both flagged `is_current_month = false`. Cell matching is
    /// by day number only, so adjacent-month cells still pick up
    /// subscriptions with the same billing day.
    pub fn generate_calendar_month(
        &self,
        month: u32,
        year: u32,
        subscriptions: &[Subscription],
    ) -> CalendarMonth {
        let days_in_month = self.days_in_month(month, year);
        let first_weekday = self.first_weekday_of_month(month, year);

        let mut days = Vec::with_capacity(GRID_CELLS);

        // Walk back into the previous month so the grid starts on a Monday
        let (prev_month, prev_year) = self.previous_month(month, year);
        let prev_month_days = self.days_in_month(prev_month, prev_year);
        for i in 0..first_weekday {
            let day = prev_month_days - first_weekday + 1 + i;
            days.push(build_cell(prev_year, prev_month, day, false, subscriptions));
        }

        for day in 1..=days_in_month {
            days.push(build_cell(year, month, day, true, subscriptions));
        }

        // Fill forward into the next month until the grid is complete
        let (next_month, next_year) = self.next_month(month, year);
        let mut day = 1;
        while days.len() < GRID_CELLS {
            days.push(build_cell(next_year, next_month, day, false, subscriptions));
            day += 1;
        }

        CalendarMonth {
            month,
            year,
            first_weekday,
            days,
        }
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Weekday of the 1st of the month, Monday = 0 through Sunday = 6.
    pub fn first_weekday_of_month(&self, month: u32, year: u32) -> u32 {
        if let Some(date) = NaiveDate::from_ymd_opt(year as i32, month, 1) {
            date.weekday().num_days_from_monday()
        } else {
            // Invalid date, fall back to Monday
            0
        }
    }

    /// Navigate to the previous month
    pub fn previous_month(&self, current_month: u32, current_year: u32) -> (u32, u32) {
        if current_month == 1 {
            (12, current_year - 1)
        } else {
            (current_month - 1, current_year)
        }
    }

    /// Navigate to the next month
    pub fn next_month(&self, current_month: u32, current_year: u32) -> (u32, u32) {
        if current_month == 12 {
            (1, current_year + 1)
        } else {
            (current_month + 1, current_year)
        }
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

fn build_cell(
    year: u32,
    month: u32,
    day: u32,
    is_current_month: bool,
    subscriptions: &[Subscription],
) -> CalendarCell {
    CalendarCell {
        year,
        month,
        day,
        is_current_month,
        subscriptions: aggregation::subscriptions_on_day(subscriptions, day),
    }
}
