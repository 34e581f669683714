pub mod distribution;
pub mod record;

pub use distribution::{
    DirectSpec, DistributionSpec, RawDistribution, ResolutionStrategy, SpecEntry, VendorSelector,
    WebSpec,
};
pub use record::{HashType, Outcome, RecordSource, ResultRecord, ResultSet};
