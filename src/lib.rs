pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{
    calculator::{build_report, compute, compute_top},
    etl::{EtlEngine, RunOutcome},
    percentile::{lookup, lookup_str},
    pipeline::SalaryPipeline,
};
pub use crate::domain::model::{
    PercentileResult, QualifyingOfferReport, RankedList, RawSalaryRecord, SalaryRecord,
    StatisticsResult, QUALIFYING_POOL_SIZE,
};
pub use crate::utils::error::{QoError, Result};
