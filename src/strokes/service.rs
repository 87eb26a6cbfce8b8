//! Fetches stroke-order art for the card currently on screen without
//! blocking the UI thread. Every request is tagged with a generation
//! number; when a newer card is drawn before an older response arrives,
//! the old response is dropped on receipt, so the art shown always belongs
//! to the newest request.

use std::sync::mpsc::{Receiver, Sender, channel};

use eframe::egui;

use super::fetcher::{self, StrokeOrderResult};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum StrokeArtState {
    #[default]
    Idle,
    Loading,
    Ready(String),
    Missing,
}

pub struct StrokeOrderService {
    generation: u64,
    sender: Sender<(u64, StrokeOrderResult)>,
    receiver: Receiver<(u64, StrokeOrderResult)>,
    state: StrokeArtState,
}

impl StrokeOrderService {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            generation: 0,
            sender,
            receiver,
            state: StrokeArtState::Idle,
        }
    }

    pub fn state(&self) -> &StrokeArtState {
        &self.state
    }

    /// Starts fetching art for the first character of `text`, superseding
    /// any fetch still in flight.
    pub fn request(&mut self, text: &str, ctx: &egui::Context) {
        self.generation += 1;

        let Some(character) = text.chars().next() else {
            self.state = StrokeArtState::Missing;
            return;
        };

        self.state = StrokeArtState::Loading;
        let generation = self.generation;
        let sender = self.sender.clone();
        let ctx_clone = ctx.clone();

        std::thread::spawn(move || {
            let result = match fetcher::http_client() {
                Ok(client) => fetcher::fetch_stroke_order(&client, character),
                Err(e) => StrokeOrderResult::Failed(format!("HTTP client build failed: {e}")),
            };
            let _ = sender.send((generation, result));
            ctx_clone.request_repaint();
        });
    }

    /// Drains finished fetches. Call once per frame.
    pub fn poll(&mut self) {
        while let Ok((generation, result)) = self.receiver.try_recv() {
            if generation != self.generation {
                // A newer card was drawn while this fetch was in flight.
                continue;
            }
            self.state = match result {
                StrokeOrderResult::Found(svg) => StrokeArtState::Ready(svg),
                StrokeOrderResult::NotFound => StrokeArtState::Missing,
                StrokeOrderResult::Failed(message) => {
                    eprintln!("Stroke order fetch failed: {message}");
                    StrokeArtState::Missing
                }
            };
        }
    }

    /// Forgets the current art and invalidates in-flight fetches, e.g. when
    /// leaving the practice screen.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = StrokeArtState::Idle;
    }

    /// Cache key for the image loader; changes with every request so a new
    /// card never shows a stale texture.
    pub fn art_uri(&self) -> String {
        format!("bytes://stroke-order-{}.svg", self.generation)
    }
}

impl Default for StrokeOrderService {
    fn default() -> Self {
        Self::new()
    }
}
