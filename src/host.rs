//! Host adapters
//!
//! The simulation only produces [`GameEvent`]s. A host plugs its renderer and
//! audio player in through these traits; failures on their side never reach
//! the game loop.

use crate::format_score;
use crate::sim::{Cue, GameEvent};

/// Errors a sink may report back
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("missing asset `{0}`")]
    MissingAsset(String),

    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),
}

/// Receives everything except audio cues
pub trait RenderSink {
    fn apply(&mut self, event: &GameEvent) -> Result<(), SinkError>;
}

/// Fire-and-forget cue playback
pub trait AudioSink {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError>;
}

/// HUD label text for the current and best score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub best: String,
}

impl HudText {
    pub fn new(score: u64, best: u64) -> Self {
        Self {
            score: format_score(score),
            best: format_score(best),
        }
    }
}

/// Route events to the sinks, logging and skipping any sink failure
pub fn dispatch<I>(events: I, render: &mut impl RenderSink, audio: &mut impl AudioSink)
where
    I: IntoIterator<Item = GameEvent>,
{
    for event in events {
        match event {
            GameEvent::Cue(cue) => {
                if let Err(err) = audio.play(cue) {
                    log::debug!("Ignoring {:?} cue: {}", cue, err);
                }
            }
            event => {
                if let Err(err) = render.apply(&event) {
                    log::warn!("Render sink rejected {:?}: {}", event, err);
                }
            }
        }
    }
}

/// Sink that writes the interesting events to the log
#[derive(Debug, Default)]
pub struct LogSink {
    pub hud: Option<HudText>,
}

impl RenderSink for LogSink {
    fn apply(&mut self, event: &GameEvent) -> Result<(), SinkError> {
        match event {
            GameEvent::ScoreChanged { score, best } => {
                let hud = HudText::new(*score, *best);
                log::debug!("score {} best {}", hud.score, hud.best);
                self.hud = Some(hud);
            }
            GameEvent::OverlayShown { message, score } => match score {
                Some(score) => log::info!("{} Score: {}", message, format_score(*score)),
                None => log::info!("{}", message),
            },
            GameEvent::GameOver { score, best } => {
                log::info!("Run ended at {} (best {})", score, best);
            }
            _ => log::trace!("{:?}", event),
        }
        Ok(())
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError> {
        log::trace!("cue {:?}", cue);
        Ok(())
    }
}
