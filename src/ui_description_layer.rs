/*
 * This module is responsible for defining the static structure of the UI.
 * It generates a series of `PlatformCommand`s that describe the layout
 * and initial properties of UI elements: the menu bar, the two content labels
 * and the status bar. This decouples the UI definition from the
 * platform-specific implementation, facilitating a more generic platform layer.
 */
pub mod theme;

use crate::app_logic::ui_constants;

use crate::platform_layer::types::{
    DockStyle, LabelClass, LayoutRule, MenuAction, MenuItemConfig, PlatformCommand, TextAlignment,
    WindowConfig, WindowId,
};
use crate::platform_layer::StyleId;

// The window configuration of the main window: fixed title and geometry.
pub fn main_window_config() -> WindowConfig<'static> {
    let (x, y, width, height) = ui_constants::MAIN_WINDOW_GEOMETRY;
    WindowConfig {
        title: ui_constants::MAIN_WINDOW_TITLE,
        x,
        y,
        width,
        height,
    }
}

/*
 * The menu bar: File, View, Tools and Help, in that order. Only File → Exit has
 * behavior bound to it in the application logic; the remaining items are
 * placeholders that still report their `MenuAction` when clicked.
 */
pub fn build_main_menu() -> Vec<MenuItemConfig> {
    vec![
        MenuItemConfig::popup(
            "&File",
            vec![MenuItemConfig::action(MenuAction::Exit, "E&xit")],
        ),
        MenuItemConfig::popup(
            "&View",
            vec![
                MenuItemConfig::action(MenuAction::Dashboard, "&Dashboard"),
                MenuItemConfig::action(MenuAction::Graphs, "&Graphs"),
                MenuItemConfig::action(MenuAction::Records, "&Records"),
            ],
        ),
        MenuItemConfig::popup(
            "&Tools",
            vec![
                MenuItemConfig::action(MenuAction::Settings, "&Settings"),
                MenuItemConfig::action(MenuAction::ImportData, "&Import Data"),
                MenuItemConfig::action(MenuAction::ExportData, "&Export Data"),
            ],
        ),
        MenuItemConfig::popup(
            "&Help",
            vec![
                MenuItemConfig::action(MenuAction::About, "&About"),
                MenuItemConfig::action(MenuAction::Documentation, "&Documentation"),
            ],
        ),
    ]
}

/*
 * Generates a list of `PlatformCommand`s that describe the initial static UI layout
 * for the main application window: theme styles, main menu, labels, style
 * assignments and the `DefineLayout` rules positioning the labels.
 *
 * This function is intended to be called only once per window, during the initial
 * construction of the main window.
 */
pub fn build_main_window_static_layout(window_id: WindowId) -> Vec<PlatformCommand> {
    log::debug!("ui_description_layer: build_main_window_static_layout called for {window_id:?}.");

    let mut commands = theme::define_default_theme();

    commands.push(PlatformCommand::CreateMainMenu {
        window_id,
        menu_items: build_main_menu(),
    });

    commands.push(PlatformCommand::CreateLabel {
        window_id,
        parent_control_id: None,
        control_id: ui_constants::HEADING_LABEL_ID,
        initial_text: ui_constants::HEADING_TEXT.to_string(),
        class: LabelClass::Default,
        alignment: TextAlignment::Center,
    });
    commands.push(PlatformCommand::CreateLabel {
        window_id,
        parent_control_id: None,
        control_id: ui_constants::STATUS_MESSAGE_LABEL_ID,
        initial_text: ui_constants::STATUS_MESSAGE_TEXT.to_string(),
        class: LabelClass::Default,
        alignment: TextAlignment::Left,
    });
    commands.push(PlatformCommand::CreateLabel {
        window_id,
        parent_control_id: None,
        control_id: ui_constants::STATUS_BAR_LABEL_ID,
        initial_text: ui_constants::STATUS_BAR_READY_TEXT.to_string(),
        class: LabelClass::StatusBar,
        alignment: TextAlignment::Left,
    });

    for (control_id, style_id) in [
        (ui_constants::HEADING_LABEL_ID, StyleId::HeadingText),
        (ui_constants::STATUS_MESSAGE_LABEL_ID, StyleId::StatusMessageText),
        (ui_constants::STATUS_BAR_LABEL_ID, StyleId::StatusBarText),
    ] {
        commands.push(PlatformCommand::ApplyStyleToControl {
            window_id,
            control_id,
            style_id,
        });
    }

    let heading_padding = ui_constants::HEADING_PADDING;
    let message_padding = ui_constants::STATUS_MESSAGE_PADDING;
    let layout_rules = vec![
        // Status bar: docks to the bottom of the client area.
        LayoutRule {
            control_id: ui_constants::STATUS_BAR_LABEL_ID,
            parent_control_id: None,
            dock_style: DockStyle::Bottom,
            order: 0,
            fixed_size: Some(ui_constants::STATUS_BAR_HEIGHT),
            margin: (0, 0, 0, 0),
        },
        // Heading and status message share the remaining space as a vertical stack.
        LayoutRule {
            control_id: ui_constants::HEADING_LABEL_ID,
            parent_control_id: None,
            dock_style: DockStyle::ProportionalFill { weight: 1.0 },
            order: 10,
            fixed_size: None,
            margin: (
                heading_padding,
                heading_padding,
                heading_padding,
                heading_padding,
            ),
        },
        LayoutRule {
            control_id: ui_constants::STATUS_MESSAGE_LABEL_ID,
            parent_control_id: None,
            dock_style: DockStyle::ProportionalFill { weight: 1.0 },
            order: 11,
            fixed_size: None,
            margin: (
                message_padding,
                message_padding,
                message_padding,
                message_padding,
            ),
        },
    ];

    commands.push(PlatformCommand::DefineLayout {
        window_id,
        rules: layout_rules,
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform_layer::layout::calculate_layout;

    fn menu_items_of(commands: &[PlatformCommand]) -> Vec<MenuItemConfig> {
        commands
            .iter()
            .find_map(|cmd| match cmd {
                PlatformCommand::CreateMainMenu { menu_items, .. } => Some(menu_items.clone()),
                _ => None,
            })
            .expect("Commands should include CreateMainMenu")
    }

    fn label_text(
        commands: &[PlatformCommand],
        wanted: crate::platform_layer::ControlId,
    ) -> String {
        commands
            .iter()
            .find_map(|cmd| match cmd {
                PlatformCommand::CreateLabel {
                    control_id,
                    initial_text,
                    ..
                } if *control_id == wanted => Some(initial_text.clone()),
                _ => None,
            })
            .expect("label should be created")
    }

    #[test]
    fn test_main_window_config_has_fixed_title_and_geometry() {
        let config = main_window_config();
        assert_eq!(config.title, "CumulusAI - Weather Station");
        assert_eq!(
            (config.x, config.y, config.width, config.height),
            (100, 100, 1200, 800)
        );
    }

    #[test]
    fn test_menu_bar_has_four_menus_in_fixed_order() {
        let commands = build_main_window_static_layout(WindowId::new(1));
        let menus = menu_items_of(&commands);

        let titles: Vec<&str> = menus.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(titles, vec!["&File", "&View", "&Tools", "&Help"]);
        assert!(menus.iter().all(|m| m.action.is_none()));
    }

    #[test]
    fn test_menu_items_and_actions() {
        let menus = build_main_menu();
        let actions: Vec<Vec<Option<MenuAction>>> = menus
            .iter()
            .map(|menu| menu.children.iter().map(|item| item.action).collect())
            .collect();

        assert_eq!(
            actions,
            vec![
                vec![Some(MenuAction::Exit)],
                vec![
                    Some(MenuAction::Dashboard),
                    Some(MenuAction::Graphs),
                    Some(MenuAction::Records)
                ],
                vec![
                    Some(MenuAction::Settings),
                    Some(MenuAction::ImportData),
                    Some(MenuAction::ExportData)
                ],
                vec![Some(MenuAction::About), Some(MenuAction::Documentation)],
            ]
        );
        let view_texts: Vec<&str> = menus[1].children.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(view_texts, vec!["&Dashboard", "&Graphs", "&Records"]);
    }

    #[test]
    fn test_labels_and_status_bar_texts() {
        let commands = build_main_window_static_layout(WindowId::new(1));

        assert_eq!(
            label_text(&commands, ui_constants::HEADING_LABEL_ID),
            "CumulusAI - Coming Soon!"
        );
        assert_eq!(
            label_text(&commands, ui_constants::STATUS_MESSAGE_LABEL_ID),
            "Application Status: Initializing..."
        );
        assert_eq!(label_text(&commands, ui_constants::STATUS_BAR_LABEL_ID), "Ready");
    }

    #[test]
    fn test_heading_is_centered_and_status_bar_is_classified() {
        let commands = build_main_window_static_layout(WindowId::new(1));
        let heading_alignment = commands.iter().find_map(|cmd| match cmd {
            PlatformCommand::CreateLabel {
                control_id,
                alignment,
                ..
            } if *control_id == ui_constants::HEADING_LABEL_ID => Some(*alignment),
            _ => None,
        });
        assert_eq!(heading_alignment, Some(TextAlignment::Center));

        let status_bar_class = commands.iter().find_map(|cmd| match cmd {
            PlatformCommand::CreateLabel {
                control_id, class, ..
            } if *control_id == ui_constants::STATUS_BAR_LABEL_ID => Some(*class),
            _ => None,
        });
        assert_eq!(status_bar_class, Some(LabelClass::StatusBar));
    }

    #[test]
    fn test_styles_are_defined_before_they_are_applied() {
        let commands = build_main_window_static_layout(WindowId::new(1));
        for (apply_index, cmd) in commands.iter().enumerate() {
            if let PlatformCommand::ApplyStyleToControl { style_id, .. } = cmd {
                let define_index = commands.iter().position(|c| match c {
                    PlatformCommand::DefineStyle {
                        style_id: defined, ..
                    } => defined == style_id,
                    _ => false,
                });
                assert!(
                    matches!(define_index, Some(i) if i < apply_index),
                    "{style_id:?} must be defined before it is applied"
                );
            }
        }
    }

    #[test]
    fn test_every_command_targets_the_given_window() {
        let window_id = WindowId::new(7);
        let commands = build_main_window_static_layout(window_id);
        for cmd in &commands {
            match cmd {
                PlatformCommand::CreateMainMenu { window_id: w, .. }
                | PlatformCommand::CreateLabel { window_id: w, .. }
                | PlatformCommand::ApplyStyleToControl { window_id: w, .. }
                | PlatformCommand::DefineLayout { window_id: w, .. } => assert_eq!(*w, window_id),
                PlatformCommand::DefineStyle { .. } => {}
                other => panic!("Unexpected command in static layout: {other:?}"),
            }
        }
    }

    #[test]
    fn test_layout_puts_status_bar_at_bottom_of_client_area() {
        let commands = build_main_window_static_layout(WindowId::new(1));
        let rules = commands
            .iter()
            .find_map(|cmd| match cmd {
                PlatformCommand::DefineLayout { rules, .. } => Some(rules.clone()),
                _ => None,
            })
            .expect("Commands should include DefineLayout");

        let layout = calculate_layout(&rules, 1184, 741);

        let status_bar = layout[&ui_constants::STATUS_BAR_LABEL_ID];
        assert_eq!(status_bar.y + status_bar.height, 741);
        assert_eq!(status_bar.height, ui_constants::STATUS_BAR_HEIGHT);

        let heading = layout[&ui_constants::HEADING_LABEL_ID];
        let message = layout[&ui_constants::STATUS_MESSAGE_LABEL_ID];
        assert!(heading.y < message.y, "heading sits above the status message");
        assert!(message.y + message.height <= status_bar.y);
        assert_eq!(heading.x, ui_constants::HEADING_PADDING);
    }
}
