//! Navigation graph queries and the controller side of the binding.

pub mod actions;
pub mod controller;
pub mod graph;
pub mod hierarchy;
pub mod label;

pub use self::actions::{
    navigate_up, navigate_up_with_side_panel, navigation_on_click, on_nav_destination_selected,
    setup_with_nav_controller, setup_with_nav_controller_from_graph, MenuCategory, MenuItem,
};
pub use self::controller::{
    DestinationListeners, ListenerId, ListenerState, NavController, NavOptions, NavigateError,
    OnDestinationChangedListener,
};
pub use self::graph::{DestinationId, DestinationTree, GraphError, NavGraph};
pub use self::label::{fill_label, Arguments, LabelError};
