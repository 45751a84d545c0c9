mod config;
mod entry;
mod record;
mod settings;
mod vacation;

pub use config::*;
pub use entry::*;
pub use record::*;
pub use settings::*;
pub use vacation::*;
