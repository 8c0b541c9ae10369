pub mod dom;
pub mod listener;
