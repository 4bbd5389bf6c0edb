//! Composite date-time field widget.
//!
//! [`DateTimeField`] combines a free-text input, a month calendar, and two
//! time sliders around one authoritative value. Every input channel funnels
//! through the field's adapter methods into the value synchronizer, which
//! recomputes the display string and structured value together and tells the
//! field what to push outward.
//!
//! The field owns its child widgets and drives them imperatively after each
//! mutation. Child signals are for the host shell; the field itself never
//! subscribes to its own children, so there are no feedback cycles to guard
//! beyond blocking slider notifications during programmatic re-sync.

use std::sync::Arc;

use chrono::{Datelike, Timelike};
use datetime_field_core::{Object, ObjectId};

use crate::base::{Widget, WidgetBase};
use crate::calendar::{CalendarDay, CalendarGrid, MonthHeader};
use crate::document::DocumentEvents;
use crate::form::FieldBinding;
use crate::format::DateTimeFormat;
use crate::overlay::OverlayController;
use crate::slider::TimeSlider;
use crate::sync::{SyncCore, SyncOutcome};

/// Local configuration, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    /// Identifier for the field's outer chrome element.
    pub id: Option<String>,
    /// Label rendered above the input.
    pub label: Option<String>,
    /// Help text rendered below the input.
    pub help: Option<String>,
    /// Extra style class for the field chrome.
    pub css_class: Option<String>,
    /// Whether the host form requires a value.
    pub required: bool,
    /// Whether the whole field is disabled.
    pub disabled: bool,
    /// Whether a clear button is offered when a value exists.
    pub clearable: bool,
    /// Display format for the text input.
    pub format: DateTimeFormat,
}

impl FieldConfig {
    /// Create a default configuration with the long display format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chrome element identifier (builder pattern).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the label (builder pattern).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the help text (builder pattern).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the style class (builder pattern).
    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Mark the field required (builder pattern).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Disable the field (builder pattern).
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Offer a clear button (builder pattern).
    pub fn clearable(mut self) -> Self {
        self.clearable = true;
        self
    }

    /// Set the display format (builder pattern).
    pub fn with_format(mut self, format: DateTimeFormat) -> Self {
        self.format = format;
        self
    }
}

/// The hour/minute/am-pm readout rendered between the sliders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeReadout {
    /// Hour on the 12-hour clock, "1" through "12".
    pub hour: String,
    /// Zero-padded minute, "00" through "59".
    pub minute: String,
    /// "am" or "pm".
    pub meridiem: &'static str,
}

impl Default for TimeReadout {
    fn default() -> Self {
        Self {
            hour: "12".to_string(),
            minute: "00".to_string(),
            meridiem: "am",
        }
    }
}

/// Snapshot of the open overlay for rendering.
#[derive(Debug, Clone)]
pub struct OverlaySurface {
    /// The 6x7 calendar grid.
    pub weeks: Vec<[CalendarDay; 7]>,
    /// Month name shown in the header drop-down.
    pub month_name: &'static str,
    /// Year shown in the header drop-down.
    pub year: i32,
    /// Years offered by the header's year drop-down, newest first.
    pub year_options: Vec<i32>,
    /// Hour slider position, 0-23.
    pub hour: u32,
    /// Minute slider position, 0-59.
    pub minute: u32,
    /// The live time readout.
    pub readout: TimeReadout,
}

/// Snapshot of the whole field for rendering.
#[derive(Debug, Clone)]
pub struct FieldSurface {
    /// Identifier of the visible text input.
    pub input_id: String,
    /// Identifier of the hidden input registered with the host form.
    pub hidden_input_id: String,
    /// Text shown in the visible input.
    pub display_text: String,
    /// Raw canonical value mirrored into the hidden input.
    pub hidden_value: Option<String>,
    /// Whether the clear button is rendered in place of the calendar icon.
    pub show_clear_button: bool,
    /// Whether the calendar icon is rendered.
    pub show_calendar_icon: bool,
    /// Whether the field rejects input.
    pub disabled: bool,
    /// Whether the host considers the field touched.
    pub touched: bool,
    /// Host-supplied validation error.
    pub error: Option<String>,
    /// Host-supplied validation warning.
    pub warning: Option<String>,
    /// The overlay, present only while open.
    pub overlay: Option<OverlaySurface>,
}

/// A composite date-time input widget.
///
/// Construct with a [`FieldConfig`], a [`FieldBinding`] to the host form,
/// and the [`DocumentEvents`] dispatcher whose pointer-downs drive
/// outside-click dismissal. The host shell forwards UI events to the
/// `handle_*` adapter methods and re-renders from [`DateTimeField::surface`].
pub struct DateTimeField {
    /// Widget base.
    base: WidgetBase,

    /// Local configuration.
    config: FieldConfig,

    /// Connection to the host form.
    binding: FieldBinding,

    /// The value synchronizer.
    sync: SyncCore,

    /// Overlay visibility and focus.
    overlay: OverlayController,

    /// The month calendar.
    calendar: CalendarGrid,

    /// The calendar's month/year header.
    header: MonthHeader,

    /// Hour slider, 0-23 step 1.
    hour_slider: TimeSlider,

    /// Minute slider, 0-59 step 5.
    minute_slider: TimeSlider,
}

impl DateTimeField {
    /// Create a field bound to the host form.
    ///
    /// The inbound value carried by `binding` is accepted as authoritative.
    /// The overlay starts closed regardless of the value.
    pub fn new(config: FieldConfig, binding: FieldBinding, events: &Arc<DocumentEvents>) -> Self {
        let base = WidgetBase::new::<Self>();
        base.set_name(binding.name());

        let mut sync = SyncCore::new(config.format);
        sync.accept_host_value(binding.value());

        let input_id = format!("{}-formatted", binding.name());
        let overlay = OverlayController::new(events, input_id);

        let today = chrono::Local::now().date_naive();
        let (year, month) = sync
            .value()
            .map(|value| (value.year(), value.month()))
            .unwrap_or((today.year(), today.month()));

        let mut field = Self {
            base,
            calendar: CalendarGrid::new(),
            header: MonthHeader::new(year, month),
            hour_slider: TimeSlider::hours(),
            minute_slider: TimeSlider::minutes(),
            overlay,
            sync,
            binding,
            config,
        };

        if field.config.disabled {
            field.base.set_enabled(false);
            field.calendar.widget_base_mut().set_enabled(false);
            field.hour_slider.widget_base_mut().set_enabled(false);
            field.minute_slider.widget_base_mut().set_enabled(false);
        }

        // The calendar collaborator expects a focus flag even while hidden.
        field.calendar.widget_base_mut().set_focused(true);
        field.resync_children();
        field
    }

    /// The field's local configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// The host form binding. Connect to its signals to observe commits.
    pub fn binding(&self) -> &FieldBinding {
        &self.binding
    }

    /// Identifier of the visible text input element.
    pub fn input_element_id(&self) -> String {
        format!("{}-formatted", self.binding.name())
    }

    /// The overlay container's identity for pointer hit-testing.
    pub fn overlay_container_id(&self) -> ObjectId {
        self.overlay.container_id()
    }

    /// Whether the overlay is currently open.
    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// The current display text.
    pub fn display_text(&self) -> &str {
        self.sync.display()
    }

    /// The current canonical value.
    pub fn canonical_value(&self) -> Option<String> {
        self.sync.canonical()
    }

    // ====== Input Channel Adapters ======

    /// A click on the text input. Opens the overlay if it is closed.
    pub fn handle_input_click(&mut self) {
        if !self.base.is_enabled() {
            return;
        }
        self.overlay.open();
        self.base.update();
    }

    /// A click on the calendar icon. Flips the overlay.
    pub fn toggle_calendar(&mut self) {
        if !self.base.is_enabled() {
            return;
        }
        self.overlay.toggle();
        self.base.update();
    }

    /// The text input gained native focus.
    pub fn handle_input_focus(&mut self) {
        self.binding.notify_focus();
    }

    /// The text input lost native focus.
    pub fn handle_input_blur(&mut self) {
        self.binding.notify_blur();
    }

    /// Text was typed or pasted into the input.
    ///
    /// Valid text commits the parsed value and closes the overlay. Invalid
    /// text stays on screen verbatim while an absent value is committed.
    pub fn handle_input_change(&mut self, text: &str) {
        if !self.base.is_enabled() {
            return;
        }
        let outcome = self.sync.set_from_text(text);
        self.apply_outcome(outcome);
    }

    /// A day was picked in the calendar grid.
    ///
    /// Combines the day with the current time-of-day and keeps the overlay
    /// open so the user can adjust the sliders next.
    pub fn handle_date_change(&mut self, day: chrono::NaiveDate) {
        if !self.base.is_enabled() {
            return;
        }
        let outcome = self.sync.set_from_calendar_day(day);
        self.apply_outcome(outcome);
    }

    /// The calendar reported a focus change. Focus only ever turns on.
    pub fn handle_calendar_focus_change(&mut self) {
        self.overlay.set_focused(true);
        self.calendar.widget_base_mut().set_focused(true);
    }

    /// The hour slider was dragged to a raw reading.
    pub fn handle_hour_change(&mut self, hour: u32) {
        if !self.base.is_enabled() {
            return;
        }
        let outcome = self.sync.adjust_hour(hour);
        self.apply_outcome(outcome);
    }

    /// The minute slider was dragged to a raw reading. 60 clamps to 59.
    pub fn handle_minute_change(&mut self, minute: u32) {
        if !self.base.is_enabled() {
            return;
        }
        let outcome = self.sync.adjust_minute(minute);
        self.apply_outcome(outcome);
    }

    /// The month header's month drop-down changed.
    pub fn handle_month_select(&mut self, month: u32) {
        let (year, _) = self.calendar.displayed_year_month();
        self.calendar.show_month(year, month);
        self.header.show(year, month);
    }

    /// The month header's year drop-down changed.
    pub fn handle_year_select(&mut self, year: i32) {
        let (_, month) = self.calendar.displayed_year_month();
        self.calendar.show_month(year, month);
        self.header.show(year, month);
    }

    /// The clear button was clicked.
    pub fn clear_input(&mut self) {
        if !self.base.is_enabled() {
            return;
        }
        let outcome = self.sync.clear();
        self.apply_outcome(outcome);
    }

    // ====== Host Updates ======

    /// Accept an authoritative value pushed inbound by the host.
    ///
    /// Never commits back outward and never opens the overlay.
    pub fn set_value(&mut self, value: Option<&str>) {
        self.binding.accept_value(value.map(String::from));
        self.sync.accept_host_value(value);
        self.resync_children();
        self.base.update();
    }

    /// Update host-supplied validation state.
    pub fn set_validation(&mut self, touched: bool, error: Option<String>, warning: Option<String>) {
        self.binding.set_validation(touched, error, warning);
        self.base.update();
    }

    // ====== Rendering ======

    /// Snapshot the field for rendering.
    pub fn surface(&self) -> FieldSurface {
        let display_text = self.sync.display().to_string();
        let show_clear_button = self.config.clearable && !display_text.is_empty();

        FieldSurface {
            input_id: self.input_element_id(),
            hidden_input_id: self.binding.name().to_string(),
            display_text,
            hidden_value: self.binding.value().map(String::from),
            show_clear_button,
            show_calendar_icon: !show_clear_button,
            disabled: !self.base.is_enabled(),
            touched: self.binding.is_touched(),
            error: self.binding.error().map(String::from),
            warning: self.binding.warning().map(String::from),
            overlay: self.overlay.is_open().then(|| self.overlay_surface()),
        }
    }

    fn overlay_surface(&self) -> OverlaySurface {
        let readout = match self.sync.value() {
            Some(value) => {
                let (_, hour12) = value.time().hour12();
                TimeReadout {
                    hour: hour12.to_string(),
                    minute: format!("{:02}", value.time().minute()),
                    meridiem: if value.time().hour() < 12 { "am" } else { "pm" },
                }
            }
            None => TimeReadout::default(),
        };

        OverlaySurface {
            weeks: self.calendar.weeks(),
            month_name: self.header.month_name(),
            year: self.header.year(),
            year_options: MonthHeader::year_options(chrono::Local::now().year()),
            hour: self.hour_slider.value(),
            minute: self.minute_slider.value(),
            readout,
        }
    }

    // ====== Internals ======

    fn apply_outcome(&mut self, outcome: SyncOutcome) {
        if let Some(canonical) = outcome.commit {
            self.binding.commit(canonical);
        }
        if outcome.close_overlay {
            self.overlay.force_close();
        }
        self.resync_children();
        self.base.update();
    }

    /// Drive the calendar and sliders from the authoritative value.
    ///
    /// Slider notifications are blocked so a programmatic re-sync cannot be
    /// mistaken for a drag by whatever the shell wired to them.
    fn resync_children(&mut self) {
        let value = self.sync.value();

        self.hour_slider.value_changed.set_blocked(true);
        self.minute_slider.value_changed.set_blocked(true);
        match value {
            Some(value) => {
                self.hour_slider.set_value(value.time().hour());
                self.minute_slider.set_value(value.time().minute());
            }
            None => {
                self.hour_slider.set_value(0);
                self.minute_slider.set_value(0);
            }
        }
        self.hour_slider.value_changed.set_blocked(false);
        self.minute_slider.value_changed.set_blocked(false);

        self.calendar.set_selected_day(value.map(|v| v.date()));
        let (year, month) = self.calendar.displayed_year_month();
        self.header.show(year, month);
    }
}

impl Object for DateTimeField {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for DateTimeField {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

static_assertions::assert_impl_all!(DateTimeField: Send, Sync);
