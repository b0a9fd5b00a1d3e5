pub mod dashboard_handlers;
pub mod listing_handlers;
pub mod system_handlers;
pub mod upload_handlers;

pub use dashboard_handlers::*;
pub use listing_handlers::*;
pub use system_handlers::*;
pub use upload_handlers::*;
