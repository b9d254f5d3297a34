use super::{
    BoxFlags, BoxId, Ui,
    node::{MatchView, UiBox},
};
use crate::style::{Style, StyleMask, StyleRule};

/// Resolve the target style of every box, root first.
pub(super) fn style_pass(ui: &mut Ui) {
    let Some(root) = ui.root else {
        return;
    };
    let mut path = Vec::new();
    resolve(ui, root, &mut path);
}

/// Apply every rule in `rules` whose pattern matches the end of `chain`.
fn apply_rules(style: &mut Style, rules: &[StyleRule], chain: &[MatchView<'_>]) {
    for rule in rules {
        if rule.pattern.matches(chain) {
            style.apply_with_mask(&rule.style.style, rule.style.mask);
        }
    }
}

/// Resolve `id`, whose ancestors are `path`, then its children.
fn resolve(ui: &mut Ui, id: BoxId, path: &mut Vec<BoxId>) {
    path.push(id);
    let mut style = Style {
        animation_time: ui.config.ui.animation_time,
        ..Style::default()
    };
    style.apply_with_mask(&ui.default_style, ui.default_mask);
    if let Some(parent) = ui.boxes[id].parent {
        style.apply_with_mask(&ui.boxes[parent].target_style, StyleMask::INHERITED);
    }

    let views: Vec<MatchView<'_>> = path
        .iter()
        .map(|&b| MatchView {
            b: &ui.boxes[b],
            arena: &ui.arena,
            focused: ui.focus == Some(b),
        })
        .collect();
    for (i, owner) in path.iter().enumerate() {
        apply_rules(&mut style, &ui.boxes[*owner].before_rules, &views[i..]);
    }
    let b: &UiBox = &ui.boxes[id];
    style.apply_with_mask(&b.style.style, b.style.mask);
    for (i, owner) in path.iter().enumerate() {
        apply_rules(&mut style, &ui.boxes[*owner].after_rules, &views[i..]);
    }
    ui.boxes[id].target_style = style;

    for child in ui.children_of(id) {
        resolve(ui, child, path);
    }
    path.pop();
}

/// Step from `from` towards `to` by at most `step`.
fn approach(from: f32, to: f32, step: f32) -> f32 {
    if from < to {
        (from + step).min(to)
    } else {
        (from - step).max(to)
    }
}

/// Move each box's computed style and transitions towards their targets
/// by this frame's share of the animation time. New boxes snap.
pub(super) fn animate(ui: &mut Ui) {
    let dt = ui.input.dt().as_secs_f32();
    for (_, b) in &mut ui.boxes {
        let target = b.target_style;
        let rate = if target.animation_time > 0.0 {
            dt / target.animation_time
        } else {
            1.0
        };
        if b.fresh {
            b.computed = target;
        } else {
            let mask = target.animation_mask;
            let mut moving = b.computed;
            moving.animate_towards(&target, mask, rate);
            let mut next = target;
            next.apply_with_mask(&moving, mask);
            b.computed = next;
        }

        let hot_step = if b.flags.contains(BoxFlags::HOT_ANIMATION) {
            rate
        } else {
            1.0
        };
        let active_step = if b.flags.contains(BoxFlags::ACTIVE_ANIMATION) {
            rate
        } else {
            1.0
        };
        let hot = if b.hot { 1.0 } else { 0.0 };
        let active = if b.active { 1.0 } else { 0.0 };
        b.hot_transition = approach(b.hot_transition, hot, hot_step);
        b.active_transition = approach(b.active_transition, active, active_step);
        b.fresh = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_clamps_at_target() {
        assert_eq!(approach(0.0, 1.0, 0.25), 0.25);
        assert_eq!(approach(0.9, 1.0, 0.25), 1.0);
        assert_eq!(approach(1.0, 0.0, 0.5), 0.5);
        assert_eq!(approach(0.2, 0.0, 1.0), 0.0);
    }
}
