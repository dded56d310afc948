pub mod activity;
pub mod auth;
pub mod inventory;

pub use activity::ActivityRecorder;
pub use auth::AuthService;
pub use inventory::InventoryService;
