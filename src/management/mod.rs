mod auth;
mod collector;
mod enricher;
mod report;
mod table;

pub use auth::TokenManager;
pub use collector::TrackCollector;
pub use enricher::ArtistInfoManager;
pub use enricher::TrackEnricher;
pub use enricher::extract_track;
pub use report::PlaylistReport;
pub use report::build_report;
pub use table::TrackTable;
