pub mod dto;
pub mod model;
pub mod routes;
pub mod validation;

pub use model::{NewTodo, Todo, TodoId};
