//! Observation RINEX: schema, decoding and storage
pub(crate) mod decoder;
mod lli;
mod record;
mod registry;
mod snr;
mod widths;

pub(crate) mod scanner;
pub(crate) mod store;

pub use lli::LliFlags;
pub use record::{ObsEpoch, ObsKey, ObservationRecord, ObservationValue, RecordKey};
pub use registry::{PhaseCenter, PhaseShift, SchemaRegistry};
pub use snr::{Error as SnrError, SNR};
pub use store::{Error as StoreError, ObservationStore, Query};
pub use widths::{
    FieldWidth, FieldWidths, WidthKey, LLI_WIDTH, OBSERVABLE_F14_WIDTH, PHASE_F16_WIDTH,
    SSI_WIDTH, SVNN_SIZE,
};

pub(crate) use registry::RegistryBuilder;
