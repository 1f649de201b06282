pub mod classify;
pub mod error;
pub mod format;
pub mod reading;
pub mod traits;
pub mod types;

pub use classify::*;
pub use error::*;
pub use format::*;
pub use reading::*;
pub use traits::*;
pub use types::*;
