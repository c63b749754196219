pub mod erp;
pub mod error;
pub mod io;
pub mod plot;
pub mod signal;

pub use erp::*;
pub use error::ErpError;
pub use signal::*;
