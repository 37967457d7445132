pub mod items;
pub mod orders;
pub mod sessions;
pub mod users;

pub use items::Entity as Items;
pub use orders::Entity as Orders;
pub use sessions::Entity as Sessions;
pub use users::Entity as Users;
