//! Product reconciliation, carbon-score parsing and alternative ranking,
//! plus HTTP clients for the scoring backend and the vision model.

pub mod cart;
pub mod client;
pub mod error;
pub mod rank;
pub mod reconcile;
pub mod score;
pub mod types;
pub mod vision;

pub use cart::cart_link;
pub use client::ScoringClient;
pub use error::PipelineError;
pub use rank::{rank, Alternative, Ranking, Verdict};
pub use reconcile::reconcile;
pub use score::parse_score;
pub use types::{DomExtraction, RawAlternative, ScoreResponse, VisionExtraction};
pub use vision::VisionClient;
