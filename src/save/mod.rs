mod snapshot;

pub use snapshot::{RegionState, Snapshot, load_snapshot, resume, write_snapshot};
