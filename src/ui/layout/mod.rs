// src/ui/layout/mod.rs - Layout system components

// Module declarations
mod header;
mod main_layout;
mod sidebar;

// Re-exports
pub use header::Header;
pub use main_layout::Layout;
pub use sidebar::{navigation_groups, NavGroup, NavItem, Sidebar};
