use std::io::Cursor;

use lofty::{file::AudioFile, probe::Probe};

use crate::{error::Error, models::asset::Asset, Result};

/// Reads the playing time of an uploaded audio file.
pub trait DurationProbe: Send + Sync {
    /// Whole seconds, rounded down.
    fn duration_secs(&self, asset: &Asset) -> Result<u32>;
}

pub struct LoftyProbe;

impl DurationProbe for LoftyProbe {
    fn duration_secs(&self, asset: &Asset) -> Result<u32> {
        let tagged = Probe::new(Cursor::new(asset.bytes.as_ref()))
            .guess_file_type()
            .map_err(|e| Error::AudioProbeError(format!("{}: {}", asset.file_name, e)))?
            .read()?;

        Ok(tagged.properties().duration().as_secs() as u32)
    }
}

/// Duration of a new song: the WAV is probed when present, otherwise the
/// FLAC, otherwise it is 0.
pub fn lossless_duration(
    probe: &dyn DurationProbe,
    wav: Option<&Asset>,
    flac: Option<&Asset>,
) -> Result<u32> {
    match wav.or(flac) {
        Some(asset) => probe.duration_secs(asset),
        None => Ok(0),
    }
}
