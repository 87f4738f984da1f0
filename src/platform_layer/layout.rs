/*
 * Platform-agnostic layout engine. Turns the `LayoutRule`s registered through
 * `PlatformCommand::DefineLayout` into concrete rectangles for a given client
 * area size. The Win32 backend calls this on every WM_SIZE and moves the
 * native controls accordingly; keeping the arithmetic here lets it be tested
 * on any host.
 *
 * Within one parent, `Bottom` docks are carved off the bottom edge of the
 * available area in ascending `order`. Whatever remains is shared vertically
 * between the `ProportionalFill` rules according to their weights.
 */

use super::types::{ControlId, DockStyle, LayoutRule};
use std::collections::HashMap;

// A control rectangle, relative to the client area of the control's parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ControlRect {
    fn with_margin(self, margin: (i32, i32, i32, i32)) -> Self {
        let (top, right, bottom, left) = margin;
        ControlRect {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0),
            height: (self.height - top - bottom).max(0),
        }
    }
}

/*
 * Computes the rectangle of every control named in `rules`.
 * Controls whose parent never receives a rectangle (a dangling
 * `parent_control_id`) are left out of the result.
 */
pub fn calculate_layout(
    rules: &[LayoutRule],
    client_width: i32,
    client_height: i32,
) -> HashMap<ControlId, ControlRect> {
    let mut placed = HashMap::new();
    let root_area = ControlRect {
        x: 0,
        y: 0,
        width: client_width.max(0),
        height: client_height.max(0),
    };

    let mut pending_parents: Vec<(Option<ControlId>, ControlRect)> = vec![(None, root_area)];
    while let Some((parent, area)) = pending_parents.pop() {
        let mut children: Vec<&LayoutRule> = rules
            .iter()
            .filter(|rule| rule.parent_control_id == parent)
            .collect();
        if children.is_empty() {
            continue;
        }
        children.sort_by_key(|rule| rule.order);

        for (control_id, rect) in layout_siblings(&children, area) {
            if placed.insert(control_id, rect).is_some() {
                log::warn!("Layout: Control {} has more than one layout rule.", control_id.raw());
                continue;
            }
            // Children of a control are positioned relative to that control.
            let child_area = ControlRect {
                x: 0,
                y: 0,
                width: rect.width,
                height: rect.height,
            };
            pending_parents.push((Some(control_id), child_area));
        }
    }
    placed
}

fn layout_siblings(
    sorted_rules: &[&LayoutRule],
    area: ControlRect,
) -> Vec<(ControlId, ControlRect)> {
    let mut result = Vec::with_capacity(sorted_rules.len());
    let mut remaining = area;

    for rule in sorted_rules {
        if rule.dock_style != DockStyle::Bottom {
            continue;
        }
        let height = rule.fixed_size.unwrap_or(0).max(0).min(remaining.height);
        remaining.height -= height;
        let slot = ControlRect {
            y: remaining.y + remaining.height,
            height,
            ..remaining
        };
        result.push((rule.control_id, slot.with_margin(rule.margin)));
    }

    let proportional: Vec<(&LayoutRule, f32)> = sorted_rules
        .iter()
        .filter_map(|rule| match rule.dock_style {
            DockStyle::ProportionalFill { weight } => Some((*rule, weight.max(0.0))),
            DockStyle::Bottom => None,
        })
        .collect();
    if !proportional.is_empty() {
        let total_weight: f32 = proportional.iter().map(|(_, weight)| weight).sum();
        let count = proportional.len();
        let mut y = remaining.y;
        for (index, (rule, weight)) in proportional.iter().enumerate() {
            let height = if index + 1 == count {
                // The last slot absorbs rounding so the stack covers the area exactly.
                remaining.y + remaining.height - y
            } else if total_weight > 0.0 {
                (remaining.height as f32 * weight / total_weight).floor() as i32
            } else {
                remaining.height / count as i32
            };
            let slot = ControlRect {
                x: remaining.x,
                y,
                width: remaining.width,
                height,
            };
            y += height;
            result.push((rule.control_id, slot.with_margin(rule.margin)));
        }
    }

    result
}
