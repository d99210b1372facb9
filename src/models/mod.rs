pub mod item;
pub mod list;
pub mod list_item;
pub mod role;
pub mod user;

pub use item::Item;
pub use list::List;
pub use list_item::ListItem;
pub use role::{parse_role_list, InvalidRole, Role};
pub use user::User;
