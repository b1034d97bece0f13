//! The single audio resource and the loader that feeds it.
//!
//! `RodioOutput` plays decoded tracks through the default output device. The
//! rodio stream itself is not `Send`, so it lives on a dedicated thread and
//! only its mixer is handed back.

use std::io::Cursor;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source};

use crate::error::PlaybackError;

/// Operations the playback engine needs from an audio output.
pub trait AudioOutput: Send {
    /// Replace the current source with `data`. The new source starts paused.
    fn load(&mut self, data: Vec<u8>) -> Result<(), PlaybackError>;
    /// Start or resume. A source that already ran to its end restarts.
    fn play(&mut self);
    fn pause(&mut self);
    /// Drop the current source entirely.
    fn stop(&mut self);
    fn has_source(&self) -> bool;
    fn is_finished(&self) -> bool;
    fn position(&self) -> Duration;
    /// `None` when the decoder cannot determine the length.
    fn duration(&self) -> Option<Duration>;
    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError>;
    fn set_volume(&mut self, volume: f32);
}

/// Fetches the raw bytes behind a track's audio URL.
pub trait SourceLoader: Send + Sync {
    fn fetch(&self, url: String) -> BoxFuture<'static, Result<Vec<u8>, PlaybackError>>;
}

/// Keeps the output thread (and with it the stream) alive until dropped.
struct OutputThreadGuard {
    _shutdown: mpsc::Sender<()>,
}

pub struct RodioOutput {
    mixer: Mixer,
    sink: Sink,
    data: Option<Arc<[u8]>>,
    duration: Option<Duration>,
    volume: f32,
    _guard: OutputThreadGuard,
}

impl RodioOutput {
    pub fn new() -> Result<Self> {
        let (mixer, guard) = spawn_output_thread()?;
        let sink = Sink::connect_new(&mixer);
        Ok(Self {
            mixer,
            sink,
            data: None,
            duration: None,
            volume: 1.0,
            _guard: guard,
        })
    }

    fn decode(data: &Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, PlaybackError> {
        Decoder::new(Cursor::new(data.clone())).map_err(|e| PlaybackError::Decode(e.to_string()))
    }

    fn replace_sink(&mut self) {
        self.sink.stop();
        self.sink = Sink::connect_new(&self.mixer);
        self.sink.set_volume(self.volume);
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, data: Vec<u8>) -> Result<(), PlaybackError> {
        let data: Arc<[u8]> = data.into();
        let source = Self::decode(&data)?;

        self.replace_sink();
        self.sink.pause();
        self.duration = source.total_duration();
        self.sink.append(source);
        tracing::debug!(bytes = data.len(), duration = ?self.duration, "Audio source loaded");
        self.data = Some(data);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(data) = self.data.clone() {
            if self.sink.empty() {
                match Self::decode(&data) {
                    Ok(source) => {
                        self.replace_sink();
                        self.sink.append(source);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to restart finished source");
                        return;
                    }
                }
            }
        }
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.sink.stop();
        self.data = None;
        self.duration = None;
    }

    fn has_source(&self) -> bool {
        self.data.is_some()
    }

    fn is_finished(&self) -> bool {
        self.data.is_some() && self.sink.empty()
    }

    fn position(&self) -> Duration {
        if self.data.is_some() {
            self.sink.get_pos()
        } else {
            Duration::ZERO
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError> {
        self.sink
            .try_seek(position)
            .map_err(|err| PlaybackError::Output(format!("failed to seek: {err:?}")))
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.sink.set_volume(volume);
    }
}

fn spawn_output_thread() -> Result<(Mixer, OutputThreadGuard)> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<Mixer>>();
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    std::thread::Builder::new()
        .name("audio-output".to_string())
        .spawn(move || {
            let mut stream = match OutputStreamBuilder::from_default_device()
                .context("failed to open default system output stream")
                .and_then(|builder| {
                    builder
                        .with_error_callback(|err| tracing::warn!(error = %err, "Audio stream error"))
                        .open_stream_or_fallback()
                        .context("failed to start default output stream")
                }) {
                Ok(stream) => stream,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            stream.log_on_drop(false);

            let _ = ready_tx.send(Ok(stream.mixer().clone()));
            // Returns once the guard is dropped
            let _ = shutdown_rx.recv();
            tracing::debug!("Audio output thread shutting down");
        })
        .context("failed to spawn audio output thread")?;

    let mixer = ready_rx
        .recv()
        .context("audio output thread exited during start-up")??;
    tracing::info!("Audio output stream opened");

    Ok((mixer, OutputThreadGuard { _shutdown: shutdown_tx }))
}

/// Downloads audio over HTTP.
#[derive(Clone)]
pub struct HttpSourceLoader {
    client: reqwest::Client,
}

impl HttpSourceLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl SourceLoader for HttpSourceLoader {
    fn fetch(&self, url: String) -> BoxFuture<'static, Result<Vec<u8>, PlaybackError>> {
        let client = self.client.clone();
        async move {
            tracing::debug!(url = %url, "Downloading audio");
            let fail = |reason: String| PlaybackError::Fetch {
                url: url.clone(),
                reason,
            };

            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| fail(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(fail(format!("status {status}")));
            }
            let bytes = response.bytes().await.map_err(|e| fail(e.to_string()))?;

            tracing::debug!(url = %url, bytes = bytes.len(), "Audio downloaded");
            Ok(bytes.to_vec())
        }
        .boxed()
    }
}
