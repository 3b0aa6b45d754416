mod album;
mod artist;
mod outcome;
mod record;
mod track;

pub use album::{Album, AlbumId};
pub use artist::{Artist, ArtistId};
pub use outcome::{
    BatchReport, CatalogCounts, Conflict, ReconcileOutcome, ReconcileStatus, TrackMatch,
};
pub use record::{AlbumCredit, ArtistCredit, NormalizedRecord, TrackRecord};
pub use track::{Track, TrackId};
