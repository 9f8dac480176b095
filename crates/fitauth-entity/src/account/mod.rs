//! Account domain entities.

pub mod model;
pub mod role;

pub use model::{Account, AccountProfile, AccountUpdate, NewAccount};
pub use role::AccountRole;
