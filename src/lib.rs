//! motherstarter - network automation inventory translation
//!
//! Reads inventory and group records from JSON, CSV or Excel sources and
//! renders them as Nornir, pyATS and Ansible inventories or re-exports them
//! as CSV, Excel and JSON.

pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use config::Config;
pub use error::ConvertError;
pub use model::{Record, Table, TableKind};
pub use pipeline::run;
