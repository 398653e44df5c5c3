//! Domain models shared between server and display clients

mod category;
mod dish;
mod order;
mod reservation;

pub use category::{Category, OTHER_CATEGORY};
pub use dish::Dish;
pub use order::{
    DraftItem, ItemStatus, Order, OrderDraft, OrderItem, OrderStatus,
};
pub use reservation::Reservation;
