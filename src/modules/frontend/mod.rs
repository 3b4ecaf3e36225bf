mod html;
mod pages;
mod routes;

pub use routes::get_router;
