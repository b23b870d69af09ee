//! Page behaviors around the tinted logo: accent persistence, theme
//! toggling, navigation marking and timed color cycling.

pub mod accent;
pub mod cycle;
pub mod document;
pub mod nav;
pub mod page;
pub mod store;
pub mod theme;
