//! Contracts for the host widgets an app bar binding drives.
//!
//! The host owns its widgets as `Rc<RefCell<_>>`. Bindings only ever keep a
//! [`UiRef`], which doesn't keep the widget alive: once the host drops the
//! widget, [`UiRef::try_get`] returns `None` and the binding tears itself down
//! on the next event.
//!
//! ```txt
//!   host screen ──owns──▶ Rc<RefCell<Toolbar>>
//!                                 ▲
//!   AppBarListener ──UiRef────────┘ (weak)
//! ```

pub mod app_bar;

use self::app_bar::icon::DrawerArrow;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// The title and navigation icon of an app bar.
pub trait AppBar {
    fn set_title(&mut self, title: &str);

    /// Shows `icon` with an accessibility `description`, or removes the icon
    /// when both are `None`.
    fn set_navigation_icon(&mut self, icon: Option<&DrawerArrow>, description: Option<&str>);
}

/// A side panel (navigation drawer) the navigation icon can open.
pub trait SidePanel {
    fn open(&mut self);

    fn close(&mut self);

    fn toggle(&mut self);
}

/// Non-owning reference to a host widget.
pub struct UiRef<T: ?Sized> {
    target: Weak<RefCell<T>>,
}

impl<T: ?Sized> UiRef<T> {
    pub fn new(target: &Rc<RefCell<T>>) -> Self {
        UiRef {
            target: Rc::downgrade(target),
        }
    }

    /// Returns the widget if the host still holds it.
    pub fn try_get(&self) -> Option<Rc<RefCell<T>>> {
        self.target.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl<T: ?Sized> Clone for UiRef<T> {
    fn clone(&self) -> Self {
        UiRef {
            target: self.target.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for UiRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiRef")
            .field("alive", &self.is_alive())
            .finish()
    }
}
