pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod record;
pub mod version;

pub use aggregate::{aggregate, AggregatedInputs, PopulationSource};
pub use filter::filter_year;
pub use loader::{
    load_election, read_populations, read_populations_from_path, read_records,
    read_records_from_path, LoadError, LoadedElection,
};
pub use record::{ElectionRecord, Party};
pub use version::DatasetVersion;
