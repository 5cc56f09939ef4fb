//! Host events that flow back into the controller: menu selections, the
//! navigation icon and the system "up" gesture, plus the one-call setup of an
//! app bar binding.

use super::controller::{ListenerId, NavAnimations, NavController, NavOptions, NavigateError};
use super::graph::{DestinationId, GraphError};
use super::hierarchy::{find_start_destination, matches_destinations};
use crate::view::app_bar::{AppBarConfiguration, AppBarListener};
use crate::view::{AppBar, SidePanel, UiRef};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Where a menu item sits in its menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuCategory {
    #[default]
    Primary,
    /// Secondary items are pushed on top of the back stack instead of
    /// replacing everything above the start destination.
    Secondary,
}

/// A menu entry whose id names the destination it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub id: DestinationId,
    pub category: MenuCategory,
}

impl MenuItem {
    pub fn new(id: DestinationId) -> Self {
        MenuItem {
            id,
            category: MenuCategory::Primary,
        }
    }

    pub fn secondary(mut self) -> Self {
        self.category = MenuCategory::Secondary;
        self
    }
}

/// Navigates to the destination named by a selected menu item.
///
/// Returns `Ok(false)` when the item doesn't match any destination or action
/// the controller knows about.
pub fn on_nav_destination_selected<C: NavController + ?Sized>(
    item: &MenuItem,
    controller: &mut C,
) -> Result<bool, NavigateError> {
    let mut builder = NavOptions::builder()
        .launch_single_top(true)
        .animations(NavAnimations::DEFAULT);

    if item.category != MenuCategory::Secondary {
        let graph = controller.graph();
        let start = find_start_destination(graph, graph.root())?;
        builder = builder.pop_up_to(start, false);
    }

    match controller.navigate(item.id, None, &builder.build()) {
        Ok(()) => Ok(true),
        Err(NavigateError::UnknownDestination(id)) => {
            debug!(destination = %id, "menu item doesn't match a destination");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Handles the up button.
///
/// On a top level destination with a live side panel the panel is toggled.
/// Anywhere else the controller navigates up, and when it can't, the
/// configured fallback decides.
///
/// # Errors
///
/// Fails when a listener can't show the destination the controller moved to.
pub fn navigate_up<C: NavController + ?Sized>(
    controller: &mut C,
    configuration: &AppBarConfiguration,
) -> Result<bool, NavigateError> {
    let panel = configuration.side_panel().and_then(|panel| {
        let target = panel.try_get();
        if target.is_none() {
            warn!("side panel is gone, navigating up instead");
        }
        target
    });

    if let (Some(panel), Some(current)) = (panel, controller.current_destination()) {
        if matches_destinations(
            controller.graph(),
            current,
            configuration.top_level_destinations(),
        ) {
            let Ok(mut panel) = panel.try_borrow_mut() else {
                debug!(destination = %current, "side panel is busy, ignoring up");
                return Ok(false);
            };

            trace!(destination = %current, "toggling side panel");
            panel.toggle();
            return Ok(true);
        }
    }

    if controller.navigate_up()? {
        return Ok(true);
    }

    match configuration.fallback_on_navigate_up() {
        Some(fallback) => {
            debug!("controller can't navigate up, using fallback");
            Ok(fallback())
        }
        None => Ok(false),
    }
}

/// [`navigate_up`] with the configuration implied by the controller's graph.
pub fn navigate_up_with_side_panel<C: NavController + ?Sized>(
    controller: &mut C,
    side_panel: Option<UiRef<dyn SidePanel>>,
) -> Result<bool, NavigateError> {
    let graph = controller.graph();
    let configuration = AppBarConfiguration::for_graph(graph, graph.root(), side_panel)?;

    navigate_up(controller, &configuration)
}

/// Binds `app_bar` to the controller's destination changes.
///
/// The binding lives in the controller until it is removed with the returned
/// id, or until it finds the app bar or side panel gone.
pub fn setup_with_nav_controller<C: NavController + ?Sized>(
    app_bar: UiRef<dyn AppBar>,
    controller: &mut C,
    configuration: AppBarConfiguration,
) -> ListenerId {
    controller.add_on_destination_changed_listener(Box::new(AppBarListener::new(
        app_bar,
        configuration,
    )))
}

/// Like [`setup_with_nav_controller`], with the graph's start destination as
/// the only top level destination.
pub fn setup_with_nav_controller_from_graph<C: NavController + ?Sized>(
    app_bar: UiRef<dyn AppBar>,
    controller: &mut C,
    side_panel: Option<UiRef<dyn SidePanel>>,
) -> Result<ListenerId, GraphError> {
    let graph = controller.graph();
    let configuration = AppBarConfiguration::for_graph(graph, graph.root(), side_panel)?;

    Ok(setup_with_nav_controller(app_bar, controller, configuration))
}

/// Returns the click handler for the app bar's navigation icon.
///
/// The handler doesn't keep the controller alive. It returns `Ok(false)` once
/// the controller is dropped, or when it is clicked while the controller is
/// busy. Errors are those of [`navigate_up`].
pub fn navigation_on_click<C: NavController + ?Sized>(
    controller: &Rc<RefCell<C>>,
    configuration: AppBarConfiguration,
) -> impl Fn() -> Result<bool, NavigateError> {
    let controller = Rc::downgrade(controller);

    move || {
        let Some(controller) = controller.upgrade() else {
            debug!("navigation icon clicked after the controller was dropped");
            return Ok(false);
        };

        let Ok(mut controller) = controller.try_borrow_mut() else {
            debug!("navigation icon clicked while the controller is busy");
            return Ok(false);
        };

        navigate_up(&mut *controller, &configuration)
    }
}
