//! The app bar binding: configuration, navigation icon and the listener that
//! ties them to destination changes.

pub mod configuration;
pub mod icon;
pub mod listener;

pub use self::configuration::{AppBarConfiguration, AppBarConfigurationBuilder, ConfigError};
pub use self::icon::{Animation, Animator, DrawerArrow, SnapAnimator};
pub use self::listener::AppBarListener;
