//! Calendar grid widget implementation.
//!
//! This module provides [`CalendarGrid`], a headless month view for picking
//! the date part of the field's value, and [`MonthHeader`], the month/year
//! drop-down model rendered above the grid.
//!
//! The grid is always 6 rows of 7 days. Leading and trailing cells belong
//! to the adjacent months and are marked as such in [`CalendarDay`].

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use datetime_field_core::{Object, ObjectId, Signal};

use crate::base::{Widget, WidgetBase};

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// The date this cell represents.
    pub date: NaiveDate,
    /// Whether the date belongs to the displayed month.
    pub in_month: bool,
    /// Whether the date is the grid's selected day.
    pub selected: bool,
    /// Whether the date is today.
    pub today: bool,
}

/// A headless month-view calendar.
///
/// # Signals
///
/// - `day_activated(NaiveDate)`: Emitted when a day cell is activated
/// - `selection_changed(Option<NaiveDate>)`: Emitted when the selection changes
/// - `page_changed((i32, u32))`: Emitted when the displayed month changes
pub struct CalendarGrid {
    /// Widget base.
    base: WidgetBase,

    /// The currently selected day, if any.
    selected_day: Option<NaiveDate>,

    /// First day of the displayed month.
    displayed_month: NaiveDate,

    /// Signal emitted when a day cell is activated by the user.
    pub day_activated: Signal<NaiveDate>,

    /// Signal emitted when the selection changes.
    pub selection_changed: Signal<Option<NaiveDate>>,

    /// Signal emitted when the displayed (year, month) changes.
    pub page_changed: Signal<(i32, u32)>,
}

impl CalendarGrid {
    /// Create a calendar showing the current month with no selection.
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self {
            base: WidgetBase::new::<Self>(),
            selected_day: None,
            displayed_month: first_of_month(today.year(), today.month()),
            day_activated: Signal::new(),
            selection_changed: Signal::new(),
            page_changed: Signal::new(),
        }
    }

    /// Get the selected day.
    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.selected_day
    }

    /// Set the selected day, navigating the view to its month.
    pub fn set_selected_day(&mut self, day: Option<NaiveDate>) {
        if let Some(d) = day {
            self.show_date(d);
        }
        if self.selected_day != day {
            self.selected_day = day;
            self.base.update();
            self.selection_changed.emit(day);
        }
    }

    /// Set selected day using builder pattern.
    pub fn with_day(mut self, day: NaiveDate) -> Self {
        self.selected_day = Some(day);
        self.displayed_month = first_of_month(day.year(), day.month());
        self
    }

    /// Activate a day cell, as a click in the grid does.
    ///
    /// Selects the day and emits `day_activated`. The shell forwards the
    /// activation to the owning field, which combines the day with the
    /// current time-of-day.
    pub fn activate_day(&mut self, day: NaiveDate) {
        if !self.base.is_enabled() {
            return;
        }
        self.set_selected_day(Some(day));
        self.day_activated.emit(day);
    }

    /// Get the displayed year and month.
    pub fn displayed_year_month(&self) -> (i32, u32) {
        (self.displayed_month.year(), self.displayed_month.month())
    }

    /// Show the previous month.
    pub fn show_previous_month(&mut self) {
        let (year, month) = if self.displayed_month.month() == 1 {
            (self.displayed_month.year() - 1, 12)
        } else {
            (self.displayed_month.year(), self.displayed_month.month() - 1)
        };
        self.displayed_month = first_of_month(year, month);
        self.base.update();
        self.page_changed.emit((year, month));
    }

    /// Show the next month.
    pub fn show_next_month(&mut self) {
        let (year, month) = if self.displayed_month.month() == 12 {
            (self.displayed_month.year() + 1, 1)
        } else {
            (self.displayed_month.year(), self.displayed_month.month() + 1)
        };
        self.displayed_month = first_of_month(year, month);
        self.base.update();
        self.page_changed.emit((year, month));
    }

    /// Show a specific month.
    pub fn show_month(&mut self, year: i32, month: u32) {
        if !(1..=12).contains(&month) {
            return;
        }
        if self.displayed_year_month() != (year, month) {
            self.displayed_month = first_of_month(year, month);
            self.base.update();
            self.page_changed.emit((year, month));
        }
    }

    /// Navigate to show a specific date's month.
    pub fn show_date(&mut self, date: NaiveDate) {
        self.show_month(date.year(), date.month());
    }

    /// The 6x7 grid of cells for the displayed month.
    pub fn weeks(&self) -> Vec<[CalendarDay; 7]> {
        let today = Local::now().date_naive();
        let (year, month) = self.displayed_year_month();

        let first_weekday = self.displayed_month.weekday();
        let start_offset = first_weekday.num_days_from_sunday() as i64;
        let start_date = self.displayed_month - Duration::days(start_offset);

        (0..6)
            .map(|row| {
                std::array::from_fn(|col| {
                    let date = start_date + Duration::days(row * 7 + col as i64);
                    CalendarDay {
                        date,
                        in_month: date.year() == year && date.month() == month,
                        selected: self.selected_day == Some(date),
                        today: date == today,
                    }
                })
            })
            .collect()
    }

    /// The weekday of the grid's first column.
    pub fn first_day_of_week(&self) -> Weekday {
        Weekday::Sun
    }
}

impl Default for CalendarGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Object for CalendarGrid {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for CalendarGrid {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

// ====== Month Header ======

/// Month names offered by the header's month drop-down.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How many years the header's year drop-down offers.
const YEAR_SPAN: i32 = 15;

/// How far past the current year the year drop-down reaches.
const YEAR_LOOKAHEAD: i32 = 10;

/// The month/year drop-down model rendered above the calendar grid.
///
/// Cosmetic navigation only. Selections are forwarded by the shell to
/// [`CalendarGrid::show_month`]; the header never touches the field value.
///
/// # Signals
///
/// - `month_selected(u32)`: Emitted when a month is picked (1-12)
/// - `year_selected(i32)`: Emitted when a year is picked
pub struct MonthHeader {
    /// Widget base.
    base: WidgetBase,

    /// Displayed year.
    year: i32,

    /// Displayed month (1-12).
    month: u32,

    /// Signal emitted when a month is picked.
    pub month_selected: Signal<u32>,

    /// Signal emitted when a year is picked.
    pub year_selected: Signal<i32>,
}

impl MonthHeader {
    /// Create a header showing the given year and month.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            base: WidgetBase::new::<Self>(),
            year,
            month: month.clamp(1, 12),
            year_selected: Signal::new(),
            month_selected: Signal::new(),
        }
    }

    /// The displayed year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The displayed month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The displayed month's name.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Track the month shown by the grid.
    pub fn show(&mut self, year: i32, month: u32) {
        if !(1..=12).contains(&month) {
            return;
        }
        if (self.year, self.month) != (year, month) {
            self.year = year;
            self.month = month;
            self.base.update();
        }
    }

    /// Pick a month from the drop-down.
    pub fn select_month(&mut self, month: u32) {
        if !(1..=12).contains(&month) {
            return;
        }
        if self.month != month {
            self.month = month;
            self.base.update();
            self.month_selected.emit(month);
        }
    }

    /// Pick a year from the drop-down.
    pub fn select_year(&mut self, year: i32) {
        if self.year != year {
            self.year = year;
            self.base.update();
            self.year_selected.emit(year);
        }
    }

    /// Years offered by the year drop-down, newest first.
    ///
    /// Fifteen entries descending from ten years past the given current
    /// year.
    pub fn year_options(current_year: i32) -> Vec<i32> {
        (0..YEAR_SPAN)
            .map(|i| current_year + YEAR_LOOKAHEAD - i)
            .collect()
    }
}

impl Object for MonthHeader {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for MonthHeader {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}
