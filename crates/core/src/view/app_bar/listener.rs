//! Listener that drives an app bar from destination changes.

use super::configuration::AppBarConfiguration;
use super::icon::{Animation, Animator, DrawerArrow, IconDescriptions, IconState, SnapAnimator};
use crate::navigation::controller::{ListenerState, OnDestinationChangedListener};
use crate::navigation::graph::{DestinationId, DestinationTree};
use crate::navigation::hierarchy::matches_destinations;
use crate::navigation::label::{fill_label, Arguments, LabelError};
use crate::settings::AppBarSettings;
use crate::view::{AppBar, UiRef};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingState {
    Bound,
    Unbound,
}

/// Keeps an [`AppBar`] in sync with the controller's current destination.
///
/// Register it with [`NavController::add_on_destination_changed_listener`]
/// (or use [`setup_with_nav_controller`]). On every destination change it:
///
/// 1. Detaches if the app bar or the configured side panel was dropped
/// 2. Fills the destination label with the event arguments and sets the title
/// 3. Shows the drawer glyph, the up arrow, or no icon at all
/// 4. Closes the side panel
///
/// # Icon transitions
///
/// The listener owns a single [`DrawerArrow`], created the first time an icon
/// is needed. That first change snaps to the target state since there is
/// nothing to animate from. Later changes go through the [`Animator`]; a
/// transition that is still running is cancelled before the next one starts,
/// so the last destination always wins.
///
/// ```txt
///   event ──▶ [Bound] ──app bar gone──▶ [Unbound] ──▶ Detached
///               │
///               └──title + icon──▶ Attached
/// ```
///
/// [`NavController::add_on_destination_changed_listener`]: crate::navigation::NavController::add_on_destination_changed_listener
/// [`setup_with_nav_controller`]: crate::navigation::setup_with_nav_controller
pub struct AppBarListener {
    app_bar: UiRef<dyn AppBar>,
    configuration: AppBarConfiguration,
    descriptions: IconDescriptions,
    animator: Box<dyn Animator>,
    animate: bool,
    arrow: Option<DrawerArrow>,
    animation: Option<Box<dyn Animation>>,
    state: BindingState,
}

impl AppBarListener {
    /// Creates a bound listener that snaps the icon between states.
    pub fn new(app_bar: UiRef<dyn AppBar>, configuration: AppBarConfiguration) -> Self {
        AppBarListener {
            app_bar,
            configuration,
            descriptions: IconDescriptions::default(),
            animator: Box::new(SnapAnimator),
            animate: true,
            arrow: None,
            animation: None,
            state: BindingState::Bound,
        }
    }

    /// Uses the host's animation facility for icon transitions.
    pub fn animator(mut self, animator: Box<dyn Animator>) -> Self {
        self.animator = animator;
        self
    }

    /// Applies accessibility texts and the animation switch from settings.
    pub fn settings(mut self, settings: &AppBarSettings) -> Self {
        self.descriptions = IconDescriptions::from(settings);
        self.animate = settings.animate_icon;
        self
    }

    pub fn is_bound(&self) -> bool {
        self.state == BindingState::Bound
    }

    /// The shared navigation icon, once one has been shown.
    pub fn icon(&self) -> Option<&DrawerArrow> {
        self.arrow.as_ref()
    }

    pub fn configuration(&self) -> &AppBarConfiguration {
        &self.configuration
    }

    fn unbind(&mut self, reason: &'static str) -> ListenerState {
        debug!(reason, "app bar listener unbinding");
        self.state = BindingState::Unbound;
        if let Some(mut animation) = self.animation.take() {
            if animation.is_running() {
                animation.cancel();
            }
        }
        ListenerState::Detached
    }

    fn set_up_indicator(&mut self, app_bar: &mut dyn AppBar, show_drawer: bool) {
        let target = if show_drawer {
            IconState::Drawer
        } else {
            IconState::Up
        };

        let (arrow, animate) = match self.arrow.clone() {
            Some(arrow) => (arrow, self.animate),
            None => {
                let arrow = DrawerArrow::new();
                self.arrow = Some(arrow.clone());
                (arrow, false)
            }
        };

        let end = target.progress();

        if let Some(mut previous) = self.animation.take() {
            if previous.is_running() {
                trace!("cancelling running icon transition");
                previous.cancel();
            }
        }

        if !animate {
            arrow.set_progress(end);
        }

        app_bar.set_navigation_icon(Some(&arrow), Some(self.descriptions.for_state(target)));

        if animate {
            let start = arrow.progress();
            self.animation = Some(self.animator.animate(&arrow, start, end));
        }
    }
}

impl OnDestinationChangedListener for AppBarListener {
    fn on_destination_changed(
        &mut self,
        graph: &dyn DestinationTree,
        destination: DestinationId,
        arguments: Option<&Arguments>,
    ) -> Result<ListenerState, LabelError> {
        if self.state == BindingState::Unbound {
            return Ok(ListenerState::Detached);
        }

        let Some(app_bar) = self.app_bar.try_get() else {
            return Ok(self.unbind("app bar dropped"));
        };

        let panel = match self.configuration.side_panel().map(UiRef::try_get) {
            Some(None) => return Ok(self.unbind("side panel dropped")),
            Some(panel) => panel,
            None => None,
        };

        let Ok(mut bar) = app_bar.try_borrow_mut() else {
            debug!(%destination, "app bar is busy, skipping destination change");
            return Ok(ListenerState::Attached);
        };

        if let Some(label) = graph.label(destination).filter(|label| !label.is_empty()) {
            let title = fill_label(label, arguments)?;
            bar.set_title(&title);
        }

        let is_top_level = matches_destinations(
            graph,
            destination,
            self.configuration.top_level_destinations(),
        );
        trace!(%destination, is_top_level, "destination changed");

        if panel.is_none() && is_top_level {
            bar.set_navigation_icon(None, None);
        } else {
            self.set_up_indicator(&mut *bar, panel.is_some() && is_top_level);
        }

        if let Some(panel) = panel {
            match panel.try_borrow_mut() {
                Ok(mut panel) => panel.close(),
                Err(_) => debug!(%destination, "side panel is busy, leaving it as is"),
            }
        }

        Ok(ListenerState::Attached)
    }
}
