pub mod container;
pub mod controller;
pub mod error;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use error::ChatFailure;
pub use router::{build_router, CHAT_ROUTE};
