//! End-to-end interaction flows through the composite field.
//!
//! These tests play the role of the host shell: they forward UI events to
//! the field's channel adapters, observe commits through the form binding,
//! and drive outside-click dismissal through the document dispatcher.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;

use datetime_field::document::{DocumentEvents, PointerTarget};
use datetime_field::{DateTimeField, DateTimeFormat, FieldBinding, FieldConfig};
use datetime_field_core::init_global_registry;

fn setup() -> Arc<DocumentEvents> {
    init_global_registry();
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
    Arc::new(DocumentEvents::new())
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn full_session_type_then_refine_with_calendar_and_sliders() {
    let events = setup();
    let mut field = DateTimeField::new(
        FieldConfig::new().with_label("Deadline").clearable(),
        FieldBinding::new("deadline"),
        &events,
    );

    let commits = Arc::new(Mutex::new(Vec::new()));
    let commits_clone = commits.clone();
    field.binding().changed.connect(move |value| {
        commits_clone.lock().push(value.clone());
    });

    // User types a value in the long format.
    field.handle_input_click();
    field.handle_input_change("March 3, 2024 at 5:00 pm");
    assert!(!field.is_overlay_open(), "valid commit closes the overlay");

    // Reopens via the icon and picks a different day; time survives.
    field.toggle_calendar();
    field.handle_date_change(day(2024, 4, 1));
    assert!(field.is_overlay_open(), "day pick keeps the overlay open");

    // Adjusts the time with both sliders.
    field.handle_hour_change(9);
    field.handle_minute_change(45);

    // Clicks elsewhere on the page; the overlay dismisses.
    events.dispatch_pointer_down(PointerTarget::anonymous());
    assert!(!field.is_overlay_open());

    assert_eq!(
        *commits.lock(),
        vec![
            Some("2024-03-03T17:00:00".to_string()),
            Some("2024-04-01T17:00:00".to_string()),
            Some("2024-04-01T09:00:00".to_string()),
            Some("2024-04-01T09:45:00".to_string()),
        ]
    );
    assert_eq!(field.display_text(), "April 1, 2024 at 9:45 am");
}

#[test]
fn shell_forwards_calendar_activation_to_the_field() {
    let events = setup();
    let mut field = DateTimeField::new(
        FieldConfig::new(),
        FieldBinding::new("deadline").with_value("2024-01-01T14:30:00"),
        &events,
    );

    // The shell wires the grid's activation signal back into the field.
    let picked = Arc::new(Mutex::new(None));
    let picked_clone = picked.clone();
    let mut grid = datetime_field::CalendarGrid::new().with_day(day(2024, 1, 1));
    grid.day_activated.connect(move |&d| {
        *picked_clone.lock() = Some(d);
    });

    grid.activate_day(day(2024, 2, 10));
    let activated = picked.lock().take().unwrap();
    field.handle_date_change(activated);

    assert_eq!(
        field.canonical_value(),
        Some("2024-02-10T14:30:00".to_string())
    );
}

#[test]
fn two_fields_dismiss_independently() {
    let events = setup();
    let mut starts = DateTimeField::new(
        FieldConfig::new(),
        FieldBinding::new("starts-at"),
        &events,
    );
    let mut ends = DateTimeField::new(
        FieldConfig::new(),
        FieldBinding::new("ends-at"),
        &events,
    );

    starts.handle_input_click();
    ends.handle_input_click();
    assert!(starts.is_overlay_open() && ends.is_overlay_open());

    // A click on the first field's input dismisses only the second overlay.
    events.dispatch_pointer_down(PointerTarget::element("starts-at-formatted"));

    assert!(starts.is_overlay_open());
    assert!(!ends.is_overlay_open());
}

#[test]
fn invalid_text_defers_to_host_validation() {
    let events = setup();
    let mut field = DateTimeField::new(
        FieldConfig::new(),
        FieldBinding::new("deadline").with_value("2024-01-01T14:30:00"),
        &events,
    );

    field.handle_input_change("not a date at all");
    assert_eq!(field.display_text(), "not a date at all");
    assert_eq!(field.canonical_value(), None);

    // The host reacts with a validation error; the field just renders it.
    field.set_validation(true, Some("Enter a valid date".to_string()), None);
    let surface = field.surface();
    assert!(surface.touched);
    assert_eq!(surface.error.as_deref(), Some("Enter a valid date"));

    // The user corrects the text and the error state is the host's to lift.
    field.handle_input_change("2024-01-02 08:00");
    assert_eq!(
        field.canonical_value(),
        Some("2024-01-02T08:00:00".to_string())
    );
}

#[test]
fn short_format_field_renders_and_parses_short_text() {
    let events = setup();
    let mut field = DateTimeField::new(
        FieldConfig::new().with_format(DateTimeFormat::Short),
        FieldBinding::new("deadline").with_value("2024-03-03T17:05:00"),
        &events,
    );

    assert_eq!(field.display_text(), "2024-03-03 17:05");

    field.handle_input_change("2024-06-30 08:15");
    assert_eq!(
        field.canonical_value(),
        Some("2024-06-30T08:15:00".to_string())
    );
}

#[test]
fn unmounted_field_ignores_later_dispatches() {
    let events = setup();
    let before = events.listener_count();

    {
        let mut field =
            DateTimeField::new(FieldConfig::new(), FieldBinding::new("deadline"), &events);
        field.handle_input_click();
        assert_eq!(events.listener_count(), before + 1);
    }

    // The field is gone; a stray dispatch must touch nothing.
    assert_eq!(events.listener_count(), before);
    events.dispatch_pointer_down(PointerTarget::anonymous());
}
