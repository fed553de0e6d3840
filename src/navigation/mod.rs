pub mod route;
pub mod router;
pub mod sidebar;

pub use route::{Destination, NavigationKey, Role};
pub use router::{RoleRouter, RouteTable, RouteTableError};
pub use sidebar::{is_active, sidebar, SidebarItem};
