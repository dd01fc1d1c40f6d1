pub mod ranking;
pub mod recommendations;
pub mod resolver;

pub use ranking::{rank, MAX_RECOMMENDATIONS};
pub use recommendations::RecommendationService;
pub use resolver::{resolve, MatchStrategy, TitleMatch};
