pub mod advice;
pub mod export;
pub mod geo;
pub mod location;
pub mod ranking;
pub mod registry;
pub mod session;
pub mod summary;

pub use crate::domain::model::{
    AdviceRequest, AdviceResponse, Branch, Citation, Coordinate, RankedBranch, SummaryCategory,
    SummaryLine, UserLocation,
};
pub use crate::domain::ports::{AdviceService, ConfigProvider, LocationProvider, Storage};
pub use crate::utils::error::Result;
