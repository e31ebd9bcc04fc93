//! Pipeline components: cancellation, context, walk loop, workers, aggregation.
//!
//! Walk thread → path channel → N workers (check, match, copy) → result channel → caller.

pub mod aggregator;
pub mod cancel;
pub mod context;
pub mod orchestrator;
pub mod walk;
pub mod worker;

pub use aggregator::{aggregate, log_report};
pub use cancel::{CancelSource, CancelToken};
pub use context::{
    PipelineChannels, PipelineHandles, PipelineTuning, WalkContext, WorkerContext,
    create_pipeline_channels,
};
pub use orchestrator::{collect_outcomes, run_pipeline};
pub use walk::{
    WalkError, WalkOutcome, WalkResult, run_walk_loop, should_include_in_walk, spawn_walk_thread,
    to_outcome_walkdir,
};
pub use worker::{process_file, spawn_workers};
