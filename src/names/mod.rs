pub mod bank;
pub mod table;

pub use bank::{random_seed, NameBank, NameSource, FIRST_NAMES};
pub use table::{MappingTable, SubstitutionTable, DEFAULT_MAX_ATTEMPTS};
