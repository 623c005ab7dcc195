//! The navigation state machine.
//!
//! A [`Navigator`] accumulates pointer deltas into a global displacement and
//! keeps a stack of [`Branch`] frames, one per menu level entered. After each
//! delta the stack is re-evaluated until a pass leaves it unchanged:
//!
//! 1. With an empty stack the displacement is classified into a root wedge,
//!    and the root item is entered once it is far enough from the centre.
//! 2. Otherwise the top frame is checked in a fixed order: pop if the pointer
//!    went back behind the entry line, arm the child boundaries once the
//!    pointer is past the dead zone, then descend if an armed boundary has
//!    been crossed.
//!
//! Armed boundaries are sticky. When a boundary arms while the pointer is
//! already past its natural position, its offset is widened so the pointer
//! stays on the inside.

use crate::geometry::{Rotor, TAN_PI_8, Vec2};
use crate::menu::{Action, ItemId, MenuItem, MenuTree};
use crate::sector::{self, Sector};
use crate::settings::{Settings, SettingsError};
use std::sync::Arc;
use thiserror::Error;

/// One entered menu level and its local decision geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub item: ItemId,
    /// Global position of this frame's local origin.
    pub origin: Vec2,
    pub rot: Rotor,
    /// Slope of the entry line; crossing back over it pops the frame.
    pub base_slope: f64,
    pub top_offset: f64,
    pub bot_offset: f64,
    /// Forward travel past the entry line before the boundaries arm.
    pub trigger_offset: f64,
    pub top_active: bool,
    pub bot_active: bool,
}

impl Branch {
    pub fn to_local(&self, global: Vec2) -> Vec2 {
        self.rot.invert().apply(global - self.origin)
    }

    pub fn to_global(&self, local: Vec2) -> Vec2 {
        self.origin + self.rot.apply(local)
    }

    /// True when `global` lies behind the entry line, which pops the frame.
    pub fn is_behind(&self, global: Vec2) -> bool {
        let pos = self.to_local(global);
        pos.x < pos.y * self.base_slope
    }

    /// Distance of the top boundary from the axis at local `x`.
    pub fn top_limit(&self, slope: f64, x: f64) -> f64 {
        self.top_offset + slope * x
    }

    /// Distance of the bottom boundary from the axis at local `x`.
    pub fn bot_limit(&self, slope: f64, x: f64) -> f64 {
        self.bot_offset + slope * x
    }
}

/// Offset a boundary takes when it arms at `y_distance` from the pointer.
///
/// A boundary that would land on the wrong side of the pointer moves out by
/// twice the shortfall rather than just up to the pointer. The factor is kept
/// as tuned, it has no derivation.
pub fn sticky_offset(offset: f64, y_distance: f64) -> f64 {
    if y_distance < offset {
        offset + (offset - y_distance)
    } else {
        offset
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error("navigation did not settle within {limit} passes")]
    Unstable { limit: usize },
    #[error("branch refers to unknown menu item {0}")]
    UnknownItem(ItemId),
    #[error("delta ({}, {}) is not finite", .0.x, .0.y)]
    NonFiniteDelta(Vec2),
}

/// What one [`Navigator::apply_delta`] call did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stabilized {
    /// Passes run, including the final one that changed nothing.
    pub passes: usize,
    pub pushed: usize,
    pub popped: usize,
}

impl Stabilized {
    pub fn changed(&self) -> bool {
        self.pushed + self.popped > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Pushed,
    Popped,
    Stable,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    tree: Arc<MenuTree>,
    settings: Settings,
    global_pos: Vec2,
    branches: Vec<Branch>,
    pass_limit: usize,
}

impl Navigator {
    pub fn new(tree: Arc<MenuTree>, settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        // a single delta may unwind the whole stack and then descend again
        let pass_limit = 2 * tree.max_depth() + 2;
        Ok(Self {
            tree,
            settings,
            global_pos: Vec2::ZERO,
            branches: Vec::new(),
            pass_limit,
        })
    }

    pub fn reset(&mut self) {
        self.global_pos = Vec2::ZERO;
        self.branches.clear();
    }

    /// Adds `delta` to the displacement and settles the stack.
    ///
    /// If the stack fails to settle it is reset before the error is returned.
    /// Non-finite deltas are rejected without touching the state.
    pub fn apply_delta(&mut self, delta: Vec2) -> Result<Stabilized, NavError> {
        if !delta.is_finite() {
            return Err(NavError::NonFiniteDelta(delta));
        }
        self.global_pos += delta;
        self.settle(self.pass_limit)
    }

    fn settle(&mut self, limit: usize) -> Result<Stabilized, NavError> {
        let result = self.stabilize(limit);
        if let Err(e) = &result {
            log::error!("Navigation reset: {}", e);
            self.reset();
        }
        result
    }

    fn stabilize(&mut self, limit: usize) -> Result<Stabilized, NavError> {
        let mut outcome = Stabilized::default();
        loop {
            if outcome.passes == limit {
                return Err(NavError::Unstable { limit });
            }
            outcome.passes += 1;
            match self.step()? {
                Step::Pushed => outcome.pushed += 1,
                Step::Popped => outcome.popped += 1,
                Step::Stable => return Ok(outcome),
            }
        }
    }

    fn step(&mut self) -> Result<Step, NavError> {
        let Some(top) = self.branches.last().copied() else {
            return Ok(self.enter_root());
        };

        let children = self
            .tree
            .get(top.item)
            .ok_or(NavError::UnknownItem(top.item))?
            .children;
        let slope = self.settings.sector_edge_slope;
        let pos = top.to_local(self.global_pos);

        if top.is_behind(self.global_pos) {
            self.branches.pop();
            log::debug!("Left {} at {}", self.label(top.item), top.rot);
            return Ok(Step::Popped);
        }

        let Some(branch) = self.branches.last_mut() else {
            return Ok(Step::Stable);
        };

        let trigger_distance = pos.x - pos.y * branch.base_slope;
        if trigger_distance > branch.trigger_offset {
            if !branch.top_active {
                branch.top_active = true;
                let y_distance = branch.top_limit(slope, pos.x) + pos.y;
                branch.top_offset = sticky_offset(branch.top_offset, y_distance);
            }
            if !branch.bot_active {
                branch.bot_active = true;
                let y_distance = branch.bot_limit(slope, pos.x) - pos.y;
                branch.bot_offset = sticky_offset(branch.bot_offset, y_distance);
            }
        }

        let Some(children) = children else {
            return Ok(Step::Stable);
        };

        let near = self.settings.branch_near_edge_offset;
        let far = self.settings.branch_far_edge_offset;
        let dead_zone = self.settings.branch_far_edge_dead_zone;

        if branch.top_active {
            let ylim = branch.top_limit(slope, pos.x);
            if pos.y < -ylim {
                let child = Branch {
                    item: children.left,
                    origin: branch.to_global(Vec2::new(pos.x, -ylim)),
                    rot: branch.rot.compose(Rotor::LEFT_TURN),
                    base_slope: slope,
                    top_offset: near,
                    bot_offset: far,
                    trigger_offset: dead_zone,
                    top_active: false,
                    bot_active: false,
                };
                if !child.is_behind(self.global_pos) {
                    branch.bot_active = true;
                    self.push(child);
                    return Ok(Step::Pushed);
                }
            }
        }

        if branch.bot_active {
            let ylim = branch.bot_limit(slope, pos.x);
            if pos.y > ylim {
                let child = Branch {
                    item: children.right,
                    origin: branch.to_global(Vec2::new(pos.x, ylim)),
                    rot: branch.rot.compose(Rotor::RIGHT_TURN),
                    base_slope: -slope,
                    top_offset: far,
                    bot_offset: near,
                    trigger_offset: dead_zone,
                    top_active: false,
                    bot_active: false,
                };
                if !child.is_behind(self.global_pos) {
                    branch.top_active = true;
                    self.push(child);
                    return Ok(Step::Pushed);
                }
            }
        }

        Ok(Step::Stable)
    }

    fn enter_root(&mut self) -> Step {
        let Sector { rot, local } = sector::classify(self.global_pos);
        let radius = self.settings.initial_radius;
        if local.x <= radius {
            return Step::Stable;
        }

        let armed = self.settings.root_edges_armed;
        let root = Branch {
            item: self.tree.root(rot),
            origin: rot.apply(Vec2::new(radius, 0.0)),
            rot,
            base_slope: 0.0,
            top_offset: radius * TAN_PI_8,
            bot_offset: radius * TAN_PI_8,
            trigger_offset: 0.0,
            top_active: armed,
            bot_active: armed,
        };
        // the classifier and the frame transform can disagree in the last bit
        if root.is_behind(self.global_pos) {
            return Step::Stable;
        }
        self.push(root);
        Step::Pushed
    }

    fn push(&mut self, branch: Branch) {
        log::debug!(
            "Entered {} at {} (depth {})",
            self.label(branch.item),
            branch.rot,
            self.branches.len() + 1
        );
        self.branches.push(branch);
    }

    fn label(&self, id: ItemId) -> &str {
        self.tree
            .get(id)
            .map(|item| item.label.as_str())
            .unwrap_or("<unknown>")
    }

    pub fn global_pos(&self) -> Vec2 {
        self.global_pos
    }

    /// Entered frames, outermost first.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn depth(&self) -> usize {
        self.branches.len()
    }

    pub fn is_idle(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn item(&self, branch: &Branch) -> Option<&MenuItem> {
        self.tree.get(branch.item)
    }

    /// The item of the innermost frame, if any. Releasing on a branch item or
    /// a placeholder selects it but yields no action.
    pub fn selected_leaf_item(&self) -> Option<&MenuItem> {
        self.branches
            .last()
            .and_then(|branch| self.tree.get(branch.item))
    }

    pub fn selected_action(&self) -> Option<&Action> {
        self.selected_leaf_item().and_then(MenuItem::action)
    }
}
