pub mod auth;
pub mod items;
pub mod list_items;
pub mod lists;
pub mod seed;
pub mod users;
pub mod validate;
