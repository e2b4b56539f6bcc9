//! Typed request bodies. Stored documents stay schemaless; these types are
//! the validated edge where client input enters the system.

pub mod order;
pub mod product;
pub mod user;

pub use order::{OrderBody, OrderItem};
pub use product::{ProductBody, ProductUpdateBody};
pub use user::{LoginBody, SignupBody};
