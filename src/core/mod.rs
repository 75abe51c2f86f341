pub mod calculator;
pub mod distribution;
pub mod etl;
pub mod percentile;
pub mod pipeline;
pub mod ranking;
pub mod source;
pub mod statistics;
pub mod validator;

pub use crate::domain::model::{
    PercentileResult, QualifyingOfferReport, RankedList, RawSalaryRecord, SalaryRecord,
    StatisticsResult, ValidationResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SourceFormat, Storage};
pub use crate::utils::error::Result;
