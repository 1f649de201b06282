pub mod indicators;
pub mod snapshot;
pub mod volatility;


pub use indicators::*;
pub use snapshot::*;
pub use volatility::*;
