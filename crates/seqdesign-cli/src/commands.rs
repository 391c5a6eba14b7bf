pub mod data;
pub mod design;
pub mod health;
pub mod validate;
