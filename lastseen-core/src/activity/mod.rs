pub mod entity;
pub use entity::{Activity, UserActivity, UserId, UsersActivity};

pub mod interface;
pub use interface::{ActivityError, ActivityResult, ActivityStorage};

pub mod service;


#[cfg(test)]
pub(crate) mod mock;
