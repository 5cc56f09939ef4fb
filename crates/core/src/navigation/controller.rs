//! Contract between the app bar and the host's navigation controller.
//!
//! The controller owns the back stack and decides what "navigate" and
//! "navigate up" mean. This crate only needs the handful of operations in
//! [`NavController`], plus a way to be told when the current destination
//! changes ([`OnDestinationChangedListener`]).
//!
//! Controllers can embed a [`DestinationListeners`] registry to store listeners
//! and dispatch events. Listeners that report [`ListenerState::Detached`] are
//! dropped by the registry, which is how an app bar binding unsubscribes itself
//! once its UI is gone.

use super::graph::{DestinationId, DestinationTree, GraphError};
use super::label::{Arguments, LabelError};
use tracing::debug;

/// Error returned by [`NavController::navigate`] and the helpers built on it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigateError {
    /// Neither a destination nor an action has this id
    #[error("navigation destination {0} is unknown to this controller")]
    UnknownDestination(DestinationId),

    /// The graph is malformed
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A listener could not build the title of the new destination
    #[error(transparent)]
    Label(#[from] LabelError),
}

/// Named transition resources applied when a navigation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavAnimations {
    pub enter: &'static str,
    pub exit: &'static str,
    pub pop_enter: &'static str,
    pub pop_exit: &'static str,
}

impl NavAnimations {
    /// The transitions used by menu driven navigation.
    pub const DEFAULT: NavAnimations = NavAnimations {
        enter: "nav_default_enter_anim",
        exit: "nav_default_exit_anim",
        pop_enter: "nav_default_pop_enter_anim",
        pop_exit: "nav_default_pop_exit_anim",
    };
}

/// Back stack truncation applied before navigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopUpTo {
    pub destination: DestinationId,
    /// Whether `destination` itself is popped too.
    pub inclusive: bool,
}

/// Options for a single navigation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavOptions {
    pub launch_single_top: bool,
    pub animations: Option<NavAnimations>,
    pub pop_up_to: Option<PopUpTo>,
}

impl NavOptions {
    pub fn builder() -> NavOptionsBuilder {
        NavOptionsBuilder::default()
    }
}

/// Fluent construction of [`NavOptions`].
#[derive(Debug, Default)]
pub struct NavOptionsBuilder {
    options: NavOptions,
}

impl NavOptionsBuilder {
    pub fn launch_single_top(mut self, single_top: bool) -> Self {
        self.options.launch_single_top = single_top;
        self
    }

    pub fn animations(mut self, animations: NavAnimations) -> Self {
        self.options.animations = Some(animations);
        self
    }

    pub fn pop_up_to(mut self, destination: DestinationId, inclusive: bool) -> Self {
        self.options.pop_up_to = Some(PopUpTo {
            destination,
            inclusive,
        });
        self
    }

    pub fn build(self) -> NavOptions {
        self.options
    }
}

/// Whether a listener wants to keep receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Attached,
    Detached,
}

/// Reacts to the controller moving to a new destination.
pub trait OnDestinationChangedListener {
    /// Called after the controller changed its current destination.
    ///
    /// Returning [`ListenerState::Detached`] unregisters the listener.
    fn on_destination_changed(
        &mut self,
        graph: &dyn DestinationTree,
        destination: DestinationId,
        arguments: Option<&Arguments>,
    ) -> Result<ListenerState, LabelError>;
}

impl<F> OnDestinationChangedListener for F
where
    F: FnMut(
        &dyn DestinationTree,
        DestinationId,
        Option<&Arguments>,
    ) -> Result<ListenerState, LabelError>,
{
    fn on_destination_changed(
        &mut self,
        graph: &dyn DestinationTree,
        destination: DestinationId,
        arguments: Option<&Arguments>,
    ) -> Result<ListenerState, LabelError> {
        self(graph, destination, arguments)
    }
}

/// Handle returned when registering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The operations the app bar needs from a navigation controller.
pub trait NavController {
    /// The graph the controller navigates.
    fn graph(&self) -> &dyn DestinationTree;

    /// The destination currently shown, if any.
    fn current_destination(&self) -> Option<DestinationId>;

    /// Navigates to a destination or action id.
    ///
    /// Fails with [`NavigateError::UnknownDestination`] when `target` names
    /// nothing in the graph.
    fn navigate(
        &mut self,
        target: DestinationId,
        arguments: Option<Arguments>,
        options: &NavOptions,
    ) -> Result<(), NavigateError>;

    /// Pops up one level. Returns `Ok(false)` when there's nowhere to go.
    ///
    /// Errors raised by listeners while the new destination is dispatched are
    /// returned, like for [`navigate`](Self::navigate).
    fn navigate_up(&mut self) -> Result<bool, NavigateError>;

    fn add_on_destination_changed_listener(
        &mut self,
        listener: Box<dyn OnDestinationChangedListener>,
    ) -> ListenerId;

    /// Returns false if no listener was registered under `id`.
    fn remove_on_destination_changed_listener(&mut self, id: ListenerId) -> bool;
}

/// Listener storage for [`NavController`] implementations.
#[derive(Default)]
pub struct DestinationListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn OnDestinationChangedListener>)>,
}

impl DestinationListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: Box<dyn OnDestinationChangedListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(listener_id, _)| *listener_id == id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Notifies every listener in registration order.
    ///
    /// Listeners that detach are removed. The first error stops the dispatch;
    /// listeners that were not reached yet stay registered.
    pub fn dispatch(
        &mut self,
        graph: &dyn DestinationTree,
        destination: DestinationId,
        arguments: Option<&Arguments>,
    ) -> Result<(), LabelError> {
        let mut index = 0;

        while index < self.listeners.len() {
            let (_, listener) = &mut self.listeners[index];
            let state = listener.on_destination_changed(graph, destination, arguments)?;

            match state {
                ListenerState::Attached => index += 1,
                ListenerState::Detached => {
                    let (id, _) = self.listeners.remove(index);
                    debug!(listener = ?id, %destination, "listener detached");
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for DestinationListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationListeners")
            .field("next_id", &self.next_id)
            .field("len", &self.listeners.len())
            .finish()
    }
}
