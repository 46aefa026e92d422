pub mod balancer;
pub mod codec;
pub mod config;
pub mod consts;
pub mod error;
pub mod model;
pub mod scorer;
pub mod session;
pub mod traits;
pub mod util;

// cmd and reports are binary modules, see main.rs.
