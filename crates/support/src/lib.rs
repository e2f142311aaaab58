//! Support desk: the modal state machine behind the "contact support" form,
//! ticket identifiers, outbound message composition and the transport seam.

pub mod config;
pub mod desk;
pub mod error;
pub mod ticket;
pub mod transport;

pub use config::*;
pub use desk::*;
pub use error::*;
pub use ticket::*;
pub use transport::*;
