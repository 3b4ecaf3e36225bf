mod handler;
mod router;

pub use router::get_router;
