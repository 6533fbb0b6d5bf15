pub mod ranking;
pub mod recommendations;

pub use ranking::Scored;
pub use recommendations::{RecommendationEngine, Recommender, DEFAULT_TOP_N};
