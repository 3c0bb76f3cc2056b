pub mod actor;
pub mod claim;
pub mod system;

pub use claim::{ClaimEvent, ClaimState, DisplayMode, Effect};
pub use system::{Builder, ShutdownHandle};
