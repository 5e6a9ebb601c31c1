/// Application layer: the dispatcher's services and the dispatch use case.
pub mod services;
pub mod use_cases;
