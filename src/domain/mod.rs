pub mod gateway;
pub mod todo;
