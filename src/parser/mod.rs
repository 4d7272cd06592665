pub mod recommendation_parser;

pub use recommendation_parser::RecommendationParser;
