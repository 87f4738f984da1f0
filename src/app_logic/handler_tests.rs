use super::handler::*;
use crate::app_logic::ui_constants;

use crate::core::APP_IDENTITY;
use crate::platform_layer::{
    AppEvent, LabelClass, PlatformCommand, PlatformEventHandler, WindowId, types::MenuAction,
};

/*
 * This module contains unit tests for `CumulusAppLogic` from the `super::handler`
 * module. Tests drive the presenter purely through `AppEvent`s and inspect the
 * commands it enqueues, the way the platform layer would drain them.
 */

fn setup_logic() -> CumulusAppLogic {
    crate::initialize_test_logging();
    CumulusAppLogic::new(&APP_IDENTITY)
}

fn setup_logic_with_window(window_id: WindowId) -> CumulusAppLogic {
    let mut logic = setup_logic();
    logic.on_main_window_created(window_id);
    let _initial = logic.test_drain_commands();
    logic
}

#[test]
fn test_on_main_window_created_enqueues_layout_then_show_then_signal() {
    let mut logic = setup_logic();
    let window_id = WindowId::new(1);

    logic.on_main_window_created(window_id);
    let cmds = logic.test_drain_commands();

    assert!(cmds.len() > 2, "Expected static layout plus show and signal");
    let last_two = &cmds[cmds.len() - 2..];
    assert_eq!(
        last_two,
        &[
            PlatformCommand::ShowWindow { window_id },
            PlatformCommand::SignalMainWindowUISetupComplete { window_id },
        ]
    );
    assert!(
        cmds.iter()
            .any(|c| matches!(c, PlatformCommand::CreateMainMenu { .. }))
    );
    assert!(cmds.iter().any(|c| matches!(
        c,
        PlatformCommand::CreateLabel { initial_text, class: LabelClass::StatusBar, .. }
            if initial_text == "Ready"
    )));
    assert_eq!(logic.main_window_id(), Some(window_id));
}

#[test]
fn test_static_layout_precedes_show_window() {
    let mut logic = setup_logic();
    logic.on_main_window_created(WindowId::new(1));
    let cmds = logic.test_drain_commands();

    let show_index = cmds
        .iter()
        .position(|c| matches!(c, PlatformCommand::ShowWindow { .. }))
        .expect("ShowWindow must be enqueued");
    let layout_index = cmds
        .iter()
        .position(|c| matches!(c, PlatformCommand::DefineLayout { .. }))
        .expect("DefineLayout must be enqueued");
    assert!(layout_index < show_index);
}

#[test]
fn test_try_dequeue_command_is_fifo() {
    let mut logic = setup_logic();
    let window_id = WindowId::new(1);
    logic.on_main_window_created(window_id);

    let mut dequeued = Vec::new();
    while let Some(cmd) = logic.try_dequeue_command() {
        dequeued.push(cmd);
    }

    let mut expected = crate::ui_description_layer::build_main_window_static_layout(window_id);
    expected.push(PlatformCommand::ShowWindow { window_id });
    expected.push(PlatformCommand::SignalMainWindowUISetupComplete { window_id });
    assert_eq!(dequeued, expected);
    assert!(logic.try_dequeue_command().is_none());
}

#[test]
fn test_setup_complete_marks_state_once() {
    let window_id = WindowId::new(1);
    let mut logic = setup_logic_with_window(window_id);

    logic.handle_event(AppEvent::MainWindowUISetupComplete { window_id });
    logic.handle_event(AppEvent::MainWindowUISetupComplete { window_id });

    assert!(logic.test_drain_commands().is_empty());
    let ui_state = logic.test_ui_state().expect("main window state exists");
    assert!(ui_state.is_setup_complete());
}

#[test]
fn test_setup_complete_for_unknown_window_is_ignored() {
    let mut logic = setup_logic_with_window(WindowId::new(1));

    logic.handle_event(AppEvent::MainWindowUISetupComplete {
        window_id: WindowId::new(99),
    });

    let ui_state = logic.test_ui_state().expect("main window state exists");
    assert!(!ui_state.is_setup_complete());
}

#[test]
fn test_menu_exit_generates_close_command() {
    let window_id = WindowId::new(1);
    let mut logic = setup_logic_with_window(window_id);

    logic.handle_event(AppEvent::MenuActionClicked {
        action: MenuAction::Exit,
    });
    let cmds = logic.test_drain_commands();

    assert_eq!(cmds, vec![PlatformCommand::CloseWindow { window_id }]);
}

#[test]
fn test_menu_exit_without_window_is_ignored() {
    let mut logic = setup_logic();

    logic.handle_event(AppEvent::MenuActionClicked {
        action: MenuAction::Exit,
    });

    assert!(logic.test_drain_commands().is_empty());
}

#[test]
fn test_inert_menu_actions_generate_no_commands() {
    let mut logic = setup_logic_with_window(WindowId::new(1));

    for action in [
        MenuAction::Dashboard,
        MenuAction::Graphs,
        MenuAction::Records,
        MenuAction::Settings,
        MenuAction::ImportData,
        MenuAction::ExportData,
        MenuAction::About,
        MenuAction::Documentation,
    ] {
        logic.handle_event(AppEvent::MenuActionClicked { action });
        assert!(
            logic.test_drain_commands().is_empty(),
            "{action:?} should not produce commands"
        );
    }
    assert!(logic.main_window_id().is_some());
}

#[test]
fn test_handle_window_close_requested_generates_close_command() {
    let window_id = WindowId::new(1);
    let mut logic = setup_logic_with_window(window_id);

    logic.handle_event(AppEvent::WindowCloseRequestedByUser { window_id });
    let cmds = logic.test_drain_commands();

    assert_eq!(cmds, vec![PlatformCommand::CloseWindow { window_id }]);
}

#[test]
fn test_close_requested_for_other_window_is_ignored() {
    let mut logic = setup_logic_with_window(WindowId::new(1));

    logic.handle_event(AppEvent::WindowCloseRequestedByUser {
        window_id: WindowId::new(2),
    });

    assert!(logic.test_drain_commands().is_empty());
}

#[test]
fn test_main_window_destroyed_requests_quit_with_code_zero() {
    let window_id = WindowId::new(1);
    let mut logic = setup_logic_with_window(window_id);

    logic.handle_event(AppEvent::WindowDestroyed { window_id });
    let cmds = logic.test_drain_commands();

    assert_eq!(
        cmds,
        vec![PlatformCommand::QuitApplication {
            exit_code: NORMAL_EXIT_CODE
        }]
    );
    assert_eq!(NORMAL_EXIT_CODE, 0);
    assert!(logic.main_window_id().is_none());
    assert!(logic.test_ui_state().is_none());
}

#[test]
fn test_destroyed_unknown_window_does_not_quit() {
    let mut logic = setup_logic_with_window(WindowId::new(1));

    logic.handle_event(AppEvent::WindowDestroyed {
        window_id: WindowId::new(5),
    });

    assert!(logic.test_drain_commands().is_empty());
    assert_eq!(logic.main_window_id(), Some(WindowId::new(1)));
}

#[test]
fn test_exit_flow_from_menu_to_quit() {
    let window_id = WindowId::new(1);
    let mut logic = setup_logic_with_window(window_id);
    logic.handle_event(AppEvent::MainWindowUISetupComplete { window_id });

    logic.handle_event(AppEvent::MenuActionClicked {
        action: MenuAction::Exit,
    });
    assert_eq!(
        logic.try_dequeue_command(),
        Some(PlatformCommand::CloseWindow { window_id })
    );

    // The platform layer reports the destruction triggered by CloseWindow.
    logic.handle_event(AppEvent::WindowDestroyed { window_id });
    assert_eq!(
        logic.try_dequeue_command(),
        Some(PlatformCommand::QuitApplication { exit_code: 0 })
    );
    assert!(logic.try_dequeue_command().is_none());
}

#[test]
fn test_on_quit_discards_pending_commands() {
    let mut logic = setup_logic();
    logic.on_main_window_created(WindowId::new(1));

    logic.on_quit();

    assert!(logic.try_dequeue_command().is_none());
}

#[test]
fn test_ui_constants_match_window_description() {
    assert_eq!(ui_constants::MAIN_WINDOW_TITLE, "CumulusAI - Weather Station");
    assert_eq!(ui_constants::STATUS_BAR_READY_TEXT, "Ready");
}
