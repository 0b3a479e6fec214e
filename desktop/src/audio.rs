use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use log::{debug, warn};
use omni_core::host::{Cue, CuePlayer};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

/// Plays cue sounds on the default output device. A new cue cuts off the
/// one still playing.
pub struct CueAudio {
    // Dropping the stream silences every sink, so it lives as long as we do.
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    clips: HashMap<Cue, Vec<u8>>,
}

impl CueAudio {
    pub fn new(asset_dir: &Path) -> Self {
        let clips = Cue::ALL
            .into_iter()
            .filter_map(|cue| {
                let path = asset_dir.join(cue.file_name());
                match std::fs::read(&path) {
                    Ok(bytes) => Some((cue, bytes)),
                    Err(err) => {
                        warn!("Unable to read {}: {}", path.display(), err);
                        None
                    }
                }
            })
            .collect();

        let (stream, handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(handle)),
            Err(err) => {
                warn!("No audio output, cues will be silent: {}", err);
                (None, None)
            }
        };

        Self {
            _stream: stream,
            handle,
            sink: None,
            clips,
        }
    }
}

impl CuePlayer for CueAudio {
    fn play(&mut self, cue: Cue) {
        debug!("Cue {:?}", cue);
        let (Some(handle), Some(clip)) = (&self.handle, self.clips.get(&cue)) else {
            return;
        };
        let source = match Decoder::new(Cursor::new(clip.clone())) {
            Ok(source) => source,
            Err(err) => {
                warn!("Unable to decode {}: {}", cue.file_name(), err);
                return;
            }
        };
        match Sink::try_new(handle) {
            Ok(sink) => {
                sink.append(source);
                // Replacing the old sink stops whatever it was playing.
                self.sink = Some(sink);
            }
            Err(err) => warn!("Unable to play {}: {}", cue.file_name(), err),
        }
    }
}
