//! Keeps an app bar's title and navigation icon in sync with the current
//! destination of a navigation graph, and routes menu and "up" events back to
//! the navigation controller.
//!
//! The host provides its widgets through the [`view::AppBar`] and
//! [`view::SidePanel`] traits and its controller through
//! [`navigation::NavController`]. A binding is created with
//! [`navigation::setup_with_nav_controller`]:
//!
//! ```txt
//!   NavController ──destination changed──▶ AppBarListener ──▶ AppBar (title, icon)
//!        ▲                                                   └─▶ SidePanel (close)
//!        └──── navigate_up / on_nav_destination_selected ◀── host clicks
//! ```

pub mod logging;
pub mod navigation;
pub mod settings;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
