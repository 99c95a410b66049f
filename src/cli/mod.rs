//! # CLI Module
//!
//! Command implementations behind the `playlistdash` binary.
//!
//! - [`serve`] - Runs the local web dashboard
//! - [`show`] - Prints the dashboard of one playlist in the terminal
//!
//! Both commands receive an already connected catalog client; credential
//! problems are dealt with before any command runs.
//!
//! ## Usage Patterns
//!
//! ```bash
//! playlistdash serve                                   # http://127.0.0.1:8501/
//! playlistdash serve --open https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! playlistdash show https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=1
//! ```

mod serve;
mod show;

pub use serve::serve;
pub use show::print_report;
pub use show::show;
