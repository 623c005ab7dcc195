//! Drawable geometry for the current navigation state.
//!
//! Everything is produced in menu units relative to the gesture centre; a
//! renderer only has to scale and translate.

use crate::geometry::{Rotor, TAN_PI_8, Vec2};
use crate::menu::ItemId;
use crate::nav::{Branch, Navigator, sticky_offset};

/// Fraction of a label's width and height to shift its top-left corner by,
/// indexed by octant, so that text grows away from the centre.
pub const TEXT_ALIGN: [Vec2; 8] = [
    Vec2::new(0.0, -0.5),
    Vec2::new(0.0, 0.0),
    Vec2::new(-0.5, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-1.0, -0.5),
    Vec2::new(-1.0, -1.0),
    Vec2::new(-0.5, -1.0),
    Vec2::new(0.0, -1.0),
];

/// Boundary rays are drawn this many initial radii long.
const RAY_LENGTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Passive,
    Active,
    /// The path from the centre through every entered frame.
    Trail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelState {
    Waiting,
    Selected,
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuideLabel {
    pub anchor: Vec2,
    pub align: Vec2,
    pub text: String,
    pub state: LabelState,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guides {
    pub segments: Vec<Segment>,
    pub labels: Vec<GuideLabel>,
}

fn align(rot: Rotor) -> Vec2 {
    TEXT_ALIGN[rot.index()]
}

pub fn layout(nav: &Navigator) -> Guides {
    let mut guides = Guides::default();
    guides.root_wedges(nav);
    for (i, branch) in nav.branches().iter().enumerate() {
        guides.branch(nav, i, branch);
    }
    guides.trail(nav);
    guides
}

impl Guides {
    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.segments.push(Segment { from, to, stroke });
    }

    fn label(
        &mut self,
        nav: &Navigator,
        id: ItemId,
        anchor: Vec2,
        align: Vec2,
        state: LabelState,
    ) {
        if let Some(item) = nav.tree().get(id) {
            self.labels.push(GuideLabel {
                anchor,
                align,
                text: item.label.to_string(),
                state,
            });
        }
    }

    fn root_wedges(&mut self, nav: &Navigator) {
        let settings = nav.settings();
        let radius = settings.initial_radius;
        let stroke = if nav.is_idle() {
            Stroke::Active
        } else {
            Stroke::Passive
        };
        let entered = nav.branches().first().map(|b| b.rot);
        let edge = Vec2::new(radius, radius * TAN_PI_8);
        let text = Vec2::new(radius + settings.branch_label_height_offset, 0.0);

        for rot in Rotor::all() {
            self.line(rot.apply(edge), rot.apply(edge.flip()), stroke);
            let state = match entered {
                None => LabelState::Waiting,
                // drawn with its frame instead
                Some(r) if r == rot => continue,
                Some(_) => LabelState::Disabled,
            };
            let id = nav.tree().root(rot);
            self.label(nav, id, rot.apply(text), align(rot), state);
        }
    }

    fn branch(&mut self, nav: &Navigator, index: usize, branch: &Branch) {
        let Some(item) = nav.item(branch) else {
            return;
        };
        let settings = nav.settings();
        let slope = settings.sector_edge_slope;
        let base = branch.base_slope;
        let is_active = index + 1 == nav.depth();
        let active_if = |on: bool| {
            if on {
                Stroke::Active
            } else {
                Stroke::Passive
            }
        };

        if let Some(children) = item.children {
            let pos = branch.to_local(nav.global_pos());
            // unarmed sides preview where they would land if armed now
            let bot_offset = if branch.bot_active {
                branch.bot_offset
            } else {
                sticky_offset(branch.bot_offset, branch.bot_limit(slope, pos.x) - pos.y)
            };
            let top_offset = if branch.top_active {
                branch.top_offset
            } else {
                sticky_offset(branch.top_offset, branch.top_limit(slope, pos.x) + pos.y)
            };

            // where each boundary meets the entry line
            let a = bot_offset / (1.0 - base * slope);
            let b = -top_offset / (1.0 + base * slope);
            let pa = Vec2::new(base * a, a);
            let pb = Vec2::new(base * b, b);
            let reach = RAY_LENGTH * settings.initial_radius;
            let qa = Vec2::new(0.0, bot_offset) + reach * Vec2::new(1.0, slope);
            let qb = Vec2::new(0.0, -top_offset) + reach * Vec2::new(1.0, -slope);

            let (gpa, gpb) = (branch.to_global(pa), branch.to_global(pb));
            self.line(gpa, gpb, active_if(is_active));
            self.line(
                branch.to_global(qa),
                gpa,
                active_if(is_active && branch.bot_active),
            );
            self.line(
                gpb,
                branch.to_global(qb),
                active_if(is_active && branch.top_active),
            );

            if is_active && !(branch.top_active && branch.bot_active) {
                let trigger = branch.trigger_offset;
                let at = (bot_offset + slope * trigger) / (1.0 - base * slope);
                let bt = (-top_offset - slope * trigger) / (1.0 + base * slope);
                self.line(
                    branch.to_global(Vec2::new(base * at + trigger, at)),
                    branch.to_global(Vec2::new(base * bt + trigger, bt)),
                    Stroke::Active,
                );
            }

            let lift = settings.branch_label_height_offset * Vec2::new(base, 1.0);
            let run = settings.branch_label_length_offset;
            let right_anchor = pa + lift + run * Vec2::new(1.0, slope);
            let left_anchor = pb - lift + run * Vec2::new(1.0, -slope);

            let (right_state, left_state) = match nav.branches().get(index + 1) {
                None => (LabelState::Waiting, LabelState::Waiting),
                Some(next) => match branch.rot.invert().compose(next.rot) {
                    Rotor::RIGHT_TURN => (LabelState::Selected, LabelState::Disabled),
                    Rotor::LEFT_TURN => (LabelState::Disabled, LabelState::Selected),
                    _ => (LabelState::Disabled, LabelState::Disabled),
                },
            };
            // selected children are labelled by their own frame
            if right_state != LabelState::Selected {
                self.label(
                    nav,
                    children.right,
                    branch.to_global(right_anchor),
                    align(branch.rot.compose(Rotor::new(1))),
                    right_state,
                );
            }
            if left_state != LabelState::Selected {
                self.label(
                    nav,
                    children.left,
                    branch.to_global(left_anchor),
                    align(branch.rot.compose(Rotor::new(7))),
                    left_state,
                );
            }
        } else {
            let leaf_base = settings.leaf_base_offset;
            let a = leaf_base / (1.0 - base * slope);
            let b = -leaf_base / (1.0 + base * slope);
            let pa = branch.to_global(Vec2::new(base * a, a));
            let pb = branch.to_global(Vec2::new(base * b, b));
            let apex = branch.to_global(Vec2::new(settings.leaf_height, 0.0));
            self.line(pa, pb, Stroke::Active);
            self.line(pb, apex, Stroke::Active);
            self.line(apex, pa, Stroke::Active);
        }

        let anchor = branch.to_global(Vec2::new(settings.branch_label_height_offset, 0.0));
        self.label(
            nav,
            branch.item,
            anchor,
            align(branch.rot),
            LabelState::Selected,
        );
    }

    fn trail(&mut self, nav: &Navigator) {
        let mut from = Vec2::ZERO;
        for branch in nav.branches() {
            self.line(from, branch.origin, Stroke::Trail);
            from = branch.origin;
        }
        self.line(from, nav.global_pos(), Stroke::Trail);
    }

    pub fn labels_in(&self, state: LabelState) -> impl Iterator<Item = &GuideLabel> {
        self.labels.iter().filter(move |l| l.state == state)
    }

    pub fn segments_with(&self, stroke: Stroke) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.stroke == stroke)
    }
}
