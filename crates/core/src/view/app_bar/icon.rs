//! The morphing navigation icon and the animation hooks that drive it.
//!
//! ```txt
//!   progress 0.0            progress 1.0
//!      ───                     ╱
//!      ───        ───▶        ────
//!      ───                     ╲
//!   (open drawer)          (navigate up)
//! ```

use crate::settings::AppBarSettings;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// The two resting states of the navigation icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconState {
    /// Hamburger, opens the side panel.
    Drawer,
    /// Arrow, navigates up.
    Up,
}

impl IconState {
    pub fn progress(self) -> f32 {
        match self {
            IconState::Drawer => 0.0,
            IconState::Up => 1.0,
        }
    }
}

/// An icon that morphs between the drawer glyph and the up arrow.
///
/// Clones share their progress: the host draws the same icon the binding
/// animates.
#[derive(Clone, Default)]
pub struct DrawerArrow {
    progress: Rc<Cell<f32>>,
}

impl DrawerArrow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    /// Sets the morph progress, clamped to `[0, 1]`.
    pub fn set_progress(&self, progress: f32) {
        self.progress.set(progress.clamp(0.0, 1.0));
    }

    /// Returns true if both values are handles to the same icon.
    pub fn same_icon(&self, other: &DrawerArrow) -> bool {
        Rc::ptr_eq(&self.progress, &other.progress)
    }
}

impl fmt::Debug for DrawerArrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerArrow")
            .field("progress", &self.progress())
            .finish()
    }
}

/// A running transition returned by an [`Animator`].
pub trait Animation {
    fn is_running(&self) -> bool;

    /// Stops the transition where it is.
    fn cancel(&mut self);
}

/// Host facility that moves an icon's progress over time.
pub trait Animator {
    /// Starts moving `icon` from `from` to `to` and returns immediately.
    fn animate(&mut self, icon: &DrawerArrow, from: f32, to: f32) -> Box<dyn Animation>;
}

/// Animator for hosts without animation support: jumps to the end value.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapAnimator;

#[derive(Debug)]
struct Finished;

impl Animation for Finished {
    fn is_running(&self) -> bool {
        false
    }

    fn cancel(&mut self) {}
}

impl Animator for SnapAnimator {
    fn animate(&mut self, icon: &DrawerArrow, _from: f32, to: f32) -> Box<dyn Animation> {
        icon.set_progress(to);
        Box::new(Finished)
    }
}

/// Accessibility text announced for each icon state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDescriptions {
    pub open_drawer: String,
    pub navigate_up: String,
}

impl IconDescriptions {
    pub fn for_state(&self, state: IconState) -> &str {
        match state {
            IconState::Drawer => &self.open_drawer,
            IconState::Up => &self.navigate_up,
        }
    }
}

impl Default for IconDescriptions {
    fn default() -> Self {
        Self::from(&AppBarSettings::default())
    }
}

impl From<&AppBarSettings> for IconDescriptions {
    fn from(settings: &AppBarSettings) -> Self {
        IconDescriptions {
            open_drawer: settings.open_drawer_description.clone(),
            navigate_up: settings.navigate_up_description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_progress() {
        let icon = DrawerArrow::new();
        let shown = icon.clone();

        icon.set_progress(0.25);

        assert_eq!(shown.progress(), 0.25);
        assert!(icon.same_icon(&shown));
        assert!(!icon.same_icon(&DrawerArrow::new()));
    }

    #[test]
    fn test_progress_is_clamped() {
        let icon = DrawerArrow::new();

        icon.set_progress(3.0);
        assert_eq!(icon.progress(), 1.0);

        icon.set_progress(-1.0);
        assert_eq!(icon.progress(), 0.0);
    }

    #[test]
    fn test_snap_animator_jumps_to_end() {
        let icon = DrawerArrow::new();
        let animation = SnapAnimator.animate(&icon, 0.0, 1.0);

        assert_eq!(icon.progress(), IconState::Up.progress());
        assert!(!animation.is_running());
    }

    #[test]
    fn test_descriptions_follow_state() {
        let descriptions = IconDescriptions::default();

        assert_eq!(
            descriptions.for_state(IconState::Drawer),
            "Open navigation drawer"
        );
        assert_eq!(descriptions.for_state(IconState::Up), "Navigate up");
    }
}
