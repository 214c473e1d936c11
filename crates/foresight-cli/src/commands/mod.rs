//! Command implementations

mod aggregate;
mod check;
mod forecast;

pub use aggregate::cmd_aggregate;
pub use check::cmd_check;
pub use forecast::cmd_forecast;
