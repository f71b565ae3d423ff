use std::sync::Arc;

use crate::{
    services::{audio_probe::DurationProbe, media_store::MediaStore, track_sequencer::TrackSequencer},
    store::CatalogStore,
};

/// Everything the gateway services need, shared by all requests.
#[derive(Clone)]
pub struct Catalog {
    pub store: Arc<dyn CatalogStore>,
    pub sequencer: Arc<TrackSequencer>,
    pub media: Arc<dyn MediaStore>,
    pub probe: Arc<dyn DurationProbe>,
}

impl Catalog {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        media: Arc<dyn MediaStore>,
        probe: Arc<dyn DurationProbe>,
    ) -> Self {
        Self {
            sequencer: Arc::new(TrackSequencer::new(store.clone())),
            store,
            media,
            probe,
        }
    }
}
