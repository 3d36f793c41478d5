mod instant;
mod ledger;
mod money;
mod rate;
mod summary;

pub use instant::*;
pub use ledger::*;
pub use money::*;
pub use rate::*;
pub use summary::*;
