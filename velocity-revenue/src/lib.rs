pub mod aggregation;
pub mod regression;
pub mod forecasting;
pub mod allocation;
pub mod pricing;
pub mod analytics;
pub mod pipeline;

pub use aggregation::{DailyDemandPoint, HistoryAggregator};
pub use forecasting::DemandForecaster;
pub use allocation::{ChannelAllocator, ChannelPolicy};
pub use pricing::RateOptimizer;
pub use analytics::RevenueDashboard;
pub use pipeline::{PipelineStage, RevenuePipeline, RunSummary};

/// Round half away from zero to 2 decimals, the precision every persisted
/// demand, rate and lift figure is stored at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
