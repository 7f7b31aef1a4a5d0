mod errors;
mod healthcheck;
mod newsletter;
mod subscribe;

pub use errors::*;
pub use healthcheck::*;
pub use newsletter::*;
pub use subscribe::*;
