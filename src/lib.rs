pub mod cell;
pub mod config;
pub mod delimited;
pub mod error;
pub mod names;
pub mod session;

pub use cell::{transform_cell, SubstitutionMode};
pub use config::Config;
pub use error::{NameSwapError, Result};
pub use names::{MappingTable, NameBank, NameSource, SubstitutionTable};
