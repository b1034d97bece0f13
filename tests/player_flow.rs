use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use rand::SeedableRng;
use rand::rngs::StdRng;

use jamendo_rs::audio::{AudioOutput, SourceLoader};
use jamendo_rs::error::PlaybackError;
use jamendo_rs::model::Track;
use jamendo_rs::playback::{PlaybackEngine, PlaybackPhase, Player};

#[derive(Default)]
struct Speaker {
    loaded: usize,
    playing: bool,
    finished: bool,
}

#[derive(Clone, Default)]
struct SharedSpeaker(Arc<Mutex<Speaker>>);

impl AudioOutput for SharedSpeaker {
    fn load(&mut self, _data: Vec<u8>) -> Result<(), PlaybackError> {
        let mut s = self.0.lock().unwrap();
        s.loaded += 1;
        s.playing = false;
        s.finished = false;
        Ok(())
    }
    fn play(&mut self) {
        self.0.lock().unwrap().playing = true;
    }
    fn pause(&mut self) {
        self.0.lock().unwrap().playing = false;
    }
    fn stop(&mut self) {
        self.0.lock().unwrap().playing = false;
    }
    fn has_source(&self) -> bool {
        self.0.lock().unwrap().loaded > 0
    }
    fn is_finished(&self) -> bool {
        self.0.lock().unwrap().finished
    }
    fn position(&self) -> Duration {
        Duration::ZERO
    }
    fn duration(&self) -> Option<Duration> {
        None
    }
    fn seek(&mut self, _position: Duration) -> Result<(), PlaybackError> {
        Ok(())
    }
    fn set_volume(&mut self, _volume: f32) {}
}

struct AlwaysOk;

impl SourceLoader for AlwaysOk {
    fn fetch(&self, url: String) -> BoxFuture<'static, Result<Vec<u8>, PlaybackError>> {
        async move { Ok(url.into_bytes()) }.boxed()
    }
}

fn track(id: &str, duration: u32) -> Track {
    Track {
        id: id.to_string(),
        name: format!("Track {id}"),
        artist_name: "Someone".to_string(),
        album_name: None,
        duration,
        audio: format!("https://audio/{id}.mp3"),
        image: None,
        shareurl: format!("https://share/{id}"),
    }
}

fn player(speaker: &SharedSpeaker, ids: &[&str]) -> Player {
    let mut engine = PlaybackEngine::with_rng(Box::new(speaker.clone()), StdRng::seed_from_u64(7));
    engine.extend_playlist(ids.iter().map(|id| track(id, 120)));
    Player::with_engine(engine, Arc::new(AlwaysOk))
}

#[tokio::test]
async fn next_wraps_around_the_playlist() {
    let speaker = SharedSpeaker::default();
    let ids = ["a", "b", "c"];
    let player = player(&speaker, &ids);
    player.play(&track("a", 120)).await.unwrap();

    for _ in 0..ids.len() {
        player.next().await.unwrap();
    }
    let snapshot = player.snapshot().await;
    assert_eq!(snapshot.state.current.unwrap().id, "a");
    assert_eq!(snapshot.state.phase, PlaybackPhase::Playing);
}

#[tokio::test]
async fn duration_falls_back_to_catalog() {
    let speaker = SharedSpeaker::default();
    let player = player(&speaker, &["a"]);
    player.play(&track("a", 120)).await.unwrap();
    assert_eq!(player.snapshot().await.duration_secs, 120.0);
}

#[tokio::test]
async fn finished_track_moves_on() {
    let speaker = SharedSpeaker::default();
    let player = player(&speaker, &["a", "b"]);
    player.play(&track("a", 120)).await.unwrap();

    speaker.0.lock().unwrap().finished = true;
    assert!(player.advance_if_finished().await);
    assert_eq!(player.snapshot().await.state.current.unwrap().id, "b");
    assert_eq!(speaker.0.lock().unwrap().loaded, 2);
}

#[tokio::test]
async fn resuming_same_track_does_not_reload() {
    let speaker = SharedSpeaker::default();
    let player = player(&speaker, &["a"]);
    player.play(&track("a", 120)).await.unwrap();
    player.pause().await;
    player.play(&track("a", 120)).await.unwrap();

    assert_eq!(speaker.0.lock().unwrap().loaded, 1);
    assert!(speaker.0.lock().unwrap().playing);
}
