pub mod activity;
pub mod activity_storage_impl;

pub mod error;

pub mod global;
