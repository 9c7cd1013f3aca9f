pub mod state;
pub mod store;

pub use state::{DashboardState, LoadingFlags, Slice};
pub use store::AppStore;
