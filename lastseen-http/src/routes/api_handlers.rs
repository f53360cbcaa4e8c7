pub(crate) mod user_ping;
pub(crate) mod users;
