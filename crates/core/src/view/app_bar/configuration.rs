//! Which destinations count as top level, and what the navigation icon controls.

use crate::navigation::graph::{DestinationId, DestinationTree, GraphError};
use crate::navigation::hierarchy::{find_start_destination, matches_destinations};
use crate::navigation::MenuItem;
use crate::view::{SidePanel, UiRef};
use fxhash::FxHashSet;
use std::fmt;
use std::rc::Rc;

/// Error raised by [`AppBarConfigurationBuilder::build`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("an app bar configuration needs at least one top level destination")]
    NoTopLevelDestinations,
}

/// Custom "up" behavior used when the controller has nowhere to go.
pub type FallbackOnNavigateUp = Rc<dyn Fn() -> bool>;

/// Configuration shared by the app bar binding and the "up" helpers.
///
/// The up affordance is hidden on top level destinations and on every
/// destination nested inside a top level graph. When a side panel is set, the
/// navigation icon shows the drawer glyph there instead and toggles the panel.
///
/// # Example
///
/// ```
/// use appbar_core::navigation::graph::DestinationId;
/// use appbar_core::view::app_bar::AppBarConfiguration;
///
/// let configuration = AppBarConfiguration::builder([DestinationId(1), DestinationId(2)])
///     .fallback_on_navigate_up(|| false)
///     .build()?;
///
/// assert_eq!(configuration.top_level_destinations().len(), 2);
/// # Ok::<(), appbar_core::view::app_bar::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct AppBarConfiguration {
    top_level_destinations: FxHashSet<DestinationId>,
    side_panel: Option<UiRef<dyn SidePanel>>,
    fallback_on_navigate_up: Option<FallbackOnNavigateUp>,
}

impl AppBarConfiguration {
    /// Starts a configuration with an explicit set of top level destinations.
    pub fn builder(ids: impl IntoIterator<Item = DestinationId>) -> AppBarConfigurationBuilder {
        AppBarConfigurationBuilder::new(ids.into_iter().collect())
    }

    /// Starts a configuration whose only top level destination is the start
    /// destination of `graph`, nested start graphs included.
    pub fn from_graph<T: DestinationTree + ?Sized>(
        tree: &T,
        graph: DestinationId,
    ) -> Result<AppBarConfigurationBuilder, GraphError> {
        let start = find_start_destination(tree, graph)?;
        Ok(Self::builder([start]))
    }

    /// Builds the configuration implied by a graph alone: its start
    /// destination is top level, and the icon toggles `side_panel` there.
    pub fn for_graph<T: DestinationTree + ?Sized>(
        tree: &T,
        graph: DestinationId,
        side_panel: Option<UiRef<dyn SidePanel>>,
    ) -> Result<AppBarConfiguration, GraphError> {
        let start = find_start_destination(tree, graph)?;

        Ok(AppBarConfiguration {
            top_level_destinations: [start].into_iter().collect(),
            side_panel,
            fallback_on_navigate_up: None,
        })
    }

    /// Starts a configuration where every menu item is a top level destination.
    pub fn from_menu<'a>(
        items: impl IntoIterator<Item = &'a MenuItem>,
    ) -> AppBarConfigurationBuilder {
        Self::builder(items.into_iter().map(|item| item.id))
    }

    pub fn top_level_destinations(&self) -> &FxHashSet<DestinationId> {
        &self.top_level_destinations
    }

    pub fn side_panel(&self) -> Option<&UiRef<dyn SidePanel>> {
        self.side_panel.as_ref()
    }

    pub fn fallback_on_navigate_up(&self) -> Option<&dyn Fn() -> bool> {
        self.fallback_on_navigate_up.as_deref()
    }

    /// Returns true if `destination` is, or is nested in, a top level destination.
    pub fn is_top_level<T: DestinationTree + ?Sized>(
        &self,
        tree: &T,
        destination: DestinationId,
    ) -> bool {
        matches_destinations(tree, destination, &self.top_level_destinations)
    }
}

impl fmt::Debug for AppBarConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppBarConfiguration")
            .field("top_level_destinations", &self.top_level_destinations)
            .field("side_panel", &self.side_panel)
            .field(
                "fallback_on_navigate_up",
                &self.fallback_on_navigate_up.is_some(),
            )
            .finish()
    }
}

/// Builder for [`AppBarConfiguration`].
pub struct AppBarConfigurationBuilder {
    top_level_destinations: FxHashSet<DestinationId>,
    side_panel: Option<UiRef<dyn SidePanel>>,
    fallback_on_navigate_up: Option<FallbackOnNavigateUp>,
}

impl AppBarConfigurationBuilder {
    fn new(top_level_destinations: FxHashSet<DestinationId>) -> Self {
        AppBarConfigurationBuilder {
            top_level_destinations,
            side_panel: None,
            fallback_on_navigate_up: None,
        }
    }

    /// Shows the drawer glyph on top level destinations and toggles `panel`
    /// from the navigation icon.
    pub fn side_panel(mut self, panel: UiRef<dyn SidePanel>) -> Self {
        self.side_panel = Some(panel);
        self
    }

    /// Called when the controller can't navigate up; returns whether it did.
    pub fn fallback_on_navigate_up(mut self, fallback: impl Fn() -> bool + 'static) -> Self {
        self.fallback_on_navigate_up = Some(Rc::new(fallback));
        self
    }

    pub fn build(self) -> Result<AppBarConfiguration, ConfigError> {
        if self.top_level_destinations.is_empty() {
            return Err(ConfigError::NoTopLevelDestinations);
        }

        Ok(AppBarConfiguration {
            top_level_destinations: self.top_level_destinations,
            side_panel: self.side_panel,
            fallback_on_navigate_up: self.fallback_on_navigate_up,
        })
    }
}
