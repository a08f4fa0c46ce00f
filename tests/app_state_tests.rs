//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - Checkbox selection and its ordering
//! - Focus, tab and scroll transitions
//! - Key handling through App

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use funnelscope::app::{App, AppState, Focus, ReportTab};
use funnelscope::engine::{Category, Table};
use funnelscope::report::ViewModel;
use funnelscope::theme::UiConstants;
use funnelscope::ui::report_scroll_limit;
use funnelscope::types::{FunnelStage, KeyFields};

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default_has_nothing_checked() {
    let state = AppState::default();
    assert_eq!(state.checked, vec![false; 4]);
    assert!(state.selected_stages().is_empty());
}

#[test]
fn test_app_state_default_focus_and_tab() {
    let state = AppState::default();
    assert_eq!(state.focus, Focus::Filters);
    assert_eq!(state.tab, ReportTab::Statistics);
    assert_eq!(state.cursor, 0);
    assert_eq!(state.report_scroll, 0);
}

#[test]
fn test_app_state_default_help_not_visible() {
    let state = AppState::default();
    assert!(!state.help_visible);
}

#[test]
fn test_app_state_with_title() {
    let state = AppState::with_title("Spring Campaign");
    assert_eq!(state.title, "Spring Campaign");
    assert_eq!(state.checked.len(), 4);
}

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn test_selected_stages_follow_sidebar_order() {
    let mut state = AppState::default();
    state.toggle(3);
    state.toggle(0);
    assert_eq!(
        state.selected_stages(),
        vec![FunnelStage::DownloadBrochure, FunnelStage::GaveFeedback]
    );
}

#[test]
fn test_toggle_twice_restores_selection() {
    let mut state = AppState::default();
    assert!(state.toggle(1));
    assert!(state.is_checked(1));
    assert!(state.toggle(1));
    assert!(!state.is_checked(1));
}

#[test]
fn test_toggle_out_of_range_is_ignored() {
    let mut state = AppState::default();
    assert!(!state.toggle(9));
    assert!(!state.is_checked(9));
}

#[test]
fn test_select_all_and_clear() {
    let mut state = AppState::default();
    assert!(state.select_all());
    assert_eq!(state.selected_stages(), FunnelStage::all());
    assert!(!state.select_all());
    assert!(state.clear_selection());
    assert!(state.selected_stages().is_empty());
    assert!(!state.clear_selection());
}

#[test]
fn test_selection_change_resets_scroll() {
    let mut state = AppState::default();
    state.set_scroll_limit(40);
    state.scroll_down(12);
    assert_eq!(state.report_scroll, 12);
    state.toggle(0);
    assert_eq!(state.report_scroll, 0);
}

// =============================================================================
// Navigation Tests
// =============================================================================

#[test]
fn test_cursor_stays_in_bounds() {
    let mut state = AppState::default();
    state.cursor_up();
    assert_eq!(state.cursor, 0);
    for _ in 0..10 {
        state.cursor_down();
    }
    assert_eq!(state.cursor, 3);
}

#[test]
fn test_next_tab_cycles() {
    let mut state = AppState::default();
    state.next_tab();
    assert_eq!(state.tab, ReportTab::FilteredData);
    state.next_tab();
    assert_eq!(state.tab, ReportTab::Statistics);
}

#[test]
fn test_scroll_saturates_at_zero() {
    let mut state = AppState::default();
    state.set_scroll_limit(40);
    state.scroll_down(3);
    state.scroll_up(10);
    assert_eq!(state.report_scroll, 0);
}

#[test]
fn test_scroll_down_stops_at_limit() {
    let mut state = AppState::default();
    state.set_scroll_limit(8);
    for _ in 0..50 {
        state.scroll_down(10);
    }
    assert_eq!(state.report_scroll, 8);
    state.scroll_up(10);
    assert_eq!(state.report_scroll, 0);
}

#[test]
fn test_lowering_limit_pulls_offset_back() {
    let mut state = AppState::default();
    state.set_scroll_limit(30);
    state.scroll_down(25);
    state.set_scroll_limit(5);
    assert_eq!(state.report_scroll, 5);
}

#[test]
fn test_toggle_focus() {
    let mut state = AppState::default();
    state.toggle_focus();
    assert_eq!(state.focus, Focus::Report);
    state.toggle_focus();
    assert_eq!(state.focus, Focus::Filters);
}

// =============================================================================
// App Key Handling Tests
// =============================================================================

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
        .unwrap()
}

fn funnel() -> Vec<Category> {
    let cols = ["Email", "Name"];
    vec![
        Category::for_stage(
            FunnelStage::DownloadBrochure,
            Table::from_rows(&cols, &[&["e1", "A"], &["e2", "B"], &["e3", "C"]]),
        ),
        Category::for_stage(
            FunnelStage::SignedUpForPreview,
            Table::from_rows(&cols, &[&["e2", "B"], &["e3", "C"]]),
        ),
        Category::for_stage(
            FunnelStage::AttendedPreview,
            Table::from_rows(&cols, &[&["e3", "C"]]),
        ),
        Category::for_stage(FunnelStage::GaveFeedback, Table::from_rows(&cols, &[])),
    ]
}

fn intersection_size(app: &App) -> Option<usize> {
    match app.view() {
        ViewModel::Report(view) => Some(view.intersection_size),
        ViewModel::NoSelection => None,
    }
}

#[test]
fn test_app_starts_with_no_selection() {
    let app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    assert_eq!(app.view(), &ViewModel::NoSelection);
    assert_eq!(app.state().stage_rows, vec![3, 2, 1, 0]);
}

#[test]
fn test_number_keys_toggle_stages() {
    let mut app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    press(&mut app, KeyCode::Char('1'));
    assert_eq!(intersection_size(&app), Some(3));
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(intersection_size(&app), Some(2));
    press(&mut app, KeyCode::Char('3'));
    assert_eq!(intersection_size(&app), Some(1));
    press(&mut app, KeyCode::Char('1'));
    assert_eq!(intersection_size(&app), Some(1));
}

#[test]
fn test_cursor_then_space_toggles() {
    let mut app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.state().selected_stages(), vec![FunnelStage::SignedUpForPreview]);
    press(&mut app, KeyCode::Enter);
    assert!(app.state().selected_stages().is_empty());
    assert_eq!(app.view(), &ViewModel::NoSelection);
}

#[test]
fn test_select_all_includes_empty_stage() {
    let mut app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(intersection_size(&app), Some(0));
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.view(), &ViewModel::NoSelection);
}

#[test]
fn test_report_focus_scrolls_instead_of_moving_cursor() {
    let mut app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.state().focus, Focus::Report);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.state().cursor, 0);
    assert_eq!(app.state().report_scroll, 2);

    press(&mut app, KeyCode::PageDown);
    assert_eq!(app.state().report_scroll, 12);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().focus, Focus::Filters);
}

#[test]
fn test_tab_switches_report_tab() {
    let mut app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().tab, ReportTab::FilteredData);
}

#[test]
fn test_quit_returns_true() {
    let mut app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    assert!(!press(&mut app, KeyCode::Char('1')));
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn test_page_up_moves_immediately_after_overscrolling() {
    let mut app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('f'));

    let limit = report_scroll_limit(app.view(), ReportTab::FilteredData);
    assert_eq!(app.state().scroll_limit, limit);
    assert!(limit > UiConstants::PAGE_SCROLL_SIZE);

    for _ in 0..50 {
        press(&mut app, KeyCode::PageDown);
    }
    assert_eq!(app.state().report_scroll, limit);

    press(&mut app, KeyCode::PageUp);
    assert_eq!(
        app.state().report_scroll,
        limit - UiConstants::PAGE_SCROLL_SIZE
    );
}

#[test]
fn test_statistics_tab_does_not_scroll() {
    let mut app = App::new(funnel(), KeyFields::default(), "Test").unwrap();
    press(&mut app, KeyCode::Char('a'));
    press(&mut app, KeyCode::Char('f'));
    press(&mut app, KeyCode::PageDown);
    assert_eq!(app.state().tab, ReportTab::Statistics);
    assert_eq!(app.state().report_scroll, 0);
}
