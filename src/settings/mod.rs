pub mod load;
pub mod model;
pub mod save;
pub mod store;

pub use model::Settings;
pub use store::{SettingsSink, SettingsStore};
