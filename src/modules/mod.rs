pub mod auth;
pub mod category;
pub mod driver;
pub mod frontend;
pub mod location;
pub mod media;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod restaurant;
pub mod user;

mod router;
pub use router::get_router;
