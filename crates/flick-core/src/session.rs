//! Press, drag and release handling around a [`Navigator`].
//!
//! The menu opens on a secondary-button press. Releasing on a selected item
//! commits it; releasing without a selection leaves the menu open, so it can
//! also be driven click-move-click with either button.

use crate::geometry::Vec2;
use crate::menu::ActionName;
use crate::nav::Navigator;
use crate::settings::{InputSettings, SettingsError};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum Mode {
    #[default]
    Disabled,
    /// Opened and the menu button is still held.
    Pressed,
    /// Opened by a click; waiting for a second press.
    Clicked,
    /// Second press after a click; the next release finishes the gesture.
    PressedAgain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Release {
    /// Nothing happened.
    Ignored,
    /// Menu stays open for click-move-click use.
    Held,
    /// Closed without a selection.
    Dismissed,
    /// Closed on an item; `None` when the item carries no action.
    Committed(Option<ActionName>),
}

#[derive(Debug, Clone)]
pub struct Session {
    nav: Navigator,
    input: InputSettings,
    mode: Mode,
    center: Vec2,
    anchor: Vec2,
    last_action: Option<ActionName>,
}

impl Session {
    pub fn new(nav: Navigator, input: InputSettings) -> Result<Self, SettingsError> {
        input.validate()?;
        Ok(Self {
            nav,
            input,
            mode: Mode::Disabled,
            center: Vec2::ZERO,
            anchor: Vec2::ZERO,
            last_action: None,
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn input(&self) -> &InputSettings {
        &self.input
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != Mode::Disabled
    }

    /// Screen position of the gesture centre.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn last_action(&self) -> Option<&ActionName> {
        self.last_action.as_ref()
    }

    /// Maps a point in menu units onto the screen.
    pub fn to_screen(&self, v: Vec2) -> Vec2 {
        self.center + self.input.display_scale * v
    }

    /// Keeps the centre far enough from the viewport edges for the root
    /// wedges to fit.
    fn clamp_center(&self, pos: Vec2, viewport: Vec2) -> Vec2 {
        let margin = self.input.min_window_margin;
        let clamp = |v: f64, extent: f64| {
            if v < margin {
                margin
            } else if v > extent - margin {
                extent - margin
            } else {
                v
            }
        };
        Vec2::new(clamp(pos.x, viewport.x), clamp(pos.y, viewport.y))
    }

    /// Menu button pressed at `pos` inside a viewport of size `viewport`.
    pub fn menu_press(&mut self, pos: Vec2, viewport: Vec2) {
        if self.mode == Mode::Clicked {
            self.mode = Mode::PressedAgain;
            return;
        }
        self.center = self.clamp_center(pos, viewport);
        self.anchor = pos;
        self.nav.reset();
        self.mode = Mode::Pressed;
        log::debug!("Menu opened at ({}, {})", self.center.x, self.center.y);
    }

    pub fn menu_release(&mut self) -> Release {
        if self.mode == Mode::Disabled {
            return Release::Ignored;
        }
        if let Some(release) = self.commit() {
            return release;
        }
        if self.mode == Mode::PressedAgain {
            self.mode = Mode::Disabled;
            Release::Dismissed
        } else {
            self.mode = Mode::Clicked;
            Release::Held
        }
    }

    pub fn select_press(&mut self) {
        if self.mode == Mode::Clicked {
            self.mode = Mode::PressedAgain;
        }
    }

    pub fn select_release(&mut self) -> Release {
        if self.mode != Mode::PressedAgain {
            return Release::Ignored;
        }
        self.commit().unwrap_or_else(|| {
            self.mode = Mode::Disabled;
            Release::Dismissed
        })
    }

    /// Closes the menu on whatever item is selected, if any.
    fn commit(&mut self) -> Option<Release> {
        let item = self.nav.selected_leaf_item()?;
        let action = item.action().map(|a| a.name.clone());
        match &action {
            Some(name) => log::info!("Selected {}", name),
            None => log::info!("Closed on {} without an action", item.label),
        }
        self.last_action = action.clone();
        self.mode = Mode::Disabled;
        Some(Release::Committed(action))
    }

    /// Returns true when the pointer motion was fed to the navigator.
    pub fn pointer_moved(&mut self, pos: Vec2) -> bool {
        if self.mode == Mode::Disabled || pos == self.anchor {
            return false;
        }
        let delta = (1.0 / self.input.display_scale) * (pos - self.anchor);
        self.anchor = pos;
        if let Err(e) = self.nav.apply_delta(delta) {
            log::warn!("Dropped pointer motion: {}", e);
        }
        true
    }

    /// Returns true if the menu was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        self.mode = Mode::Disabled;
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuTree;
    use crate::settings::Settings;
    use std::sync::Arc;

    const VIEWPORT: Vec2 = Vec2::new(1600.0, 1200.0);

    fn session() -> Session {
        let nav = Navigator::new(Arc::new(MenuTree::default()), Settings::default()).unwrap();
        Session::new(nav, InputSettings::default()).unwrap()
    }

    /// Moves the pointer by `delta` menu units.
    fn drag(session: &mut Session, delta: Vec2) {
        let scale = session.input().display_scale;
        let pos = session.anchor + scale * delta;
        assert!(session.pointer_moved(pos));
    }

    #[test]
    fn test_press_centers_and_resets() {
        let mut s = session();
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        assert_eq!(s.mode(), Mode::Pressed);
        assert_eq!(s.center(), Vec2::new(800.0, 600.0));
        assert!(s.navigator().is_idle());
    }

    #[test]
    fn test_center_is_kept_off_the_edges() {
        let mut s = session();
        s.menu_press(Vec2::new(10.0, 1150.0), VIEWPORT);
        assert_eq!(s.center(), Vec2::new(200.0, 1000.0));
    }

    #[test]
    fn test_drag_and_release_commits_leaf() {
        let mut s = session();
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        drag(&mut s, Vec2::new(1000.0, 0.0));
        drag(&mut s, Vec2::new(0.0, -400.0));
        drag(&mut s, Vec2::new(0.0, -300.0));
        drag(&mut s, Vec2::new(-400.0, 0.0));
        let release = s.menu_release();
        assert_eq!(release, Release::Committed(Some(ActionName::from("6UL"))));
        assert_eq!(s.mode(), Mode::Disabled);
        assert_eq!(s.last_action().unwrap().as_str(), "6UL");
    }

    #[test]
    fn test_release_without_selection_holds_menu_open() {
        let mut s = session();
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        assert_eq!(s.menu_release(), Release::Held);
        assert_eq!(s.mode(), Mode::Clicked);

        // still navigable while clicked
        drag(&mut s, Vec2::new(-500.0, 0.0));
        assert_eq!(s.navigator().branches().len(), 1);

        s.select_press();
        assert_eq!(s.mode(), Mode::PressedAgain);
        assert_eq!(s.select_release(), Release::Committed(None));
        assert_eq!(s.mode(), Mode::Disabled);
        assert!(s.last_action().is_none());
    }

    #[test]
    fn test_second_press_without_selection_dismisses() {
        let mut s = session();
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        s.menu_release();
        s.menu_press(Vec2::new(0.0, 0.0), VIEWPORT);
        assert_eq!(s.mode(), Mode::PressedAgain);
        // the centre does not move on the second press
        assert_eq!(s.center(), Vec2::new(800.0, 600.0));
        assert_eq!(s.menu_release(), Release::Dismissed);
        assert!(!s.is_open());
    }

    #[test]
    fn test_placeholder_clears_last_action() {
        let mut s = session();
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        drag(&mut s, Vec2::new(1000.0, 0.0));
        drag(&mut s, Vec2::new(0.0, -400.0));
        drag(&mut s, Vec2::new(0.0, -300.0));
        drag(&mut s, Vec2::new(-400.0, 0.0));
        s.menu_release();
        assert!(s.last_action().is_some());

        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        drag(&mut s, Vec2::new(0.0, 1000.0));
        assert_eq!(s.menu_release(), Release::Committed(None));
        assert_eq!(s.last_action(), None);
    }

    #[test]
    fn test_select_release_outside_second_press_is_ignored() {
        let mut s = session();
        assert_eq!(s.select_release(), Release::Ignored);
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        assert_eq!(s.select_release(), Release::Ignored);
        assert_eq!(s.mode(), Mode::Pressed);
    }

    #[test]
    fn test_motion_ignored_while_disabled() {
        let mut s = session();
        assert!(!s.pointer_moved(Vec2::new(10.0, 10.0)));
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        assert!(!s.pointer_moved(Vec2::new(800.0, 600.0)));
        assert!(s.pointer_moved(Vec2::new(810.0, 600.0)));
        assert_eq!(s.navigator().global_pos(), Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_cancel() {
        let mut s = session();
        assert!(!s.cancel());
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        assert!(s.cancel());
        assert_eq!(s.mode(), Mode::Disabled);
    }

    #[test]
    fn test_release_after_cancel_is_ignored() {
        let mut s = session();
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        drag(&mut s, Vec2::new(1000.0, 0.0));
        assert!(s.cancel());

        assert_eq!(s.menu_release(), Release::Ignored);
        assert_eq!(s.mode(), Mode::Disabled);
        assert!(s.last_action().is_none());

        // a release with no press at all is ignored too
        assert_eq!(session().menu_release(), Release::Ignored);
    }

    #[test]
    fn test_to_screen() {
        let mut s = session();
        s.menu_press(Vec2::new(800.0, 600.0), VIEWPORT);
        assert_eq!(s.to_screen(Vec2::new(100.0, -50.0)), Vec2::new(820.0, 590.0));
    }
}
