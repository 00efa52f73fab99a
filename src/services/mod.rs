pub mod controller;
pub mod providers;
pub mod similarity;

pub use controller::Controller;
pub use providers::{GameCatalog, RawgCatalog};
pub use similarity::{find_similar_games, SearchOutcome};
