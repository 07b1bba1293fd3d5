use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::keyboard::geometry::{KeyGeometry, place_keys};
use crate::keyboard::label;
use crate::keyboard::layout::KeyboardLayout;
use crate::practice::state::PracticeState;
use crate::practice::surface::{Animation, KeyFill, KeyVisual, Surface, TextSlot};

pub const TITLE: &str = "Typing Tutor";
pub const INSTRUCTIONS: &str = "Press the highlighted key on your keyboard";

/// What happens once a flash has finished playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashFollowUp {
    None,
    ChooseNewTarget,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    /// Not a key on the layout, or the session has not started.
    Ignored,
    Correct(String),
    Incorrect(String),
}

/// Drives the pick-a-key, match-the-keystroke, flash, pick-again loop.
///
/// Animation completion is never a callback: the host calls
/// [`complete_flash`](Self::complete_flash) once the surface reports the flash
/// on a key has finished.
pub struct PracticeController<S: Surface> {
    layout: KeyboardLayout,
    geometry: KeyGeometry,
    available_keys: Vec<String>,
    visuals: HashMap<String, KeyVisual>,
    state: PracticeState,
    pending_flashes: HashMap<String, FlashFollowUp>,
    pulsing: Option<String>,
    started: bool,
    surface: S,
    rng: SmallRng,
}

impl<S: Surface> PracticeController<S> {
    pub fn new(layout: KeyboardLayout, geometry: KeyGeometry, surface: S) -> Self {
        Self::with_rng(layout, geometry, surface, SmallRng::from_entropy())
    }

    pub fn with_seed(layout: KeyboardLayout, geometry: KeyGeometry, surface: S, seed: u64) -> Self {
        Self::with_rng(layout, geometry, surface, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(layout: KeyboardLayout, geometry: KeyGeometry, surface: S, rng: SmallRng) -> Self {
        let available_keys = layout.available_keys();
        Self {
            layout,
            geometry,
            available_keys,
            visuals: HashMap::new(),
            state: PracticeState::default(),
            pending_flashes: HashMap::new(),
            pulsing: None,
            started: false,
            surface,
            rng,
        }
    }

    /// Build the text scaffold, draw the keyboard and pick the first target.
    /// Later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        self.surface.create_text(TextSlot::Title, TITLE);
        self.surface.create_text(TextSlot::Instructions, INSTRUCTIONS);
        self.surface
            .create_text(TextSlot::Score, &self.state.score_line());
        self.surface.create_text(TextSlot::Prompt, "");

        self.render_keyboard();
        self.choose_new_target();
        log::info!(
            "practice session started with {} keys",
            self.available_keys.len()
        );
    }

    pub fn render_keyboard(&mut self) {
        for placement in place_keys(&self.layout, &self.geometry) {
            let visual = KeyVisual::new(placement);
            self.surface.create_key(&visual);
            self.visuals.insert(visual.label().to_string(), visual);
        }
    }

    pub fn choose_new_target(&mut self) {
        let idx = self.rng.gen_range(0..=self.available_keys.len() - 1);
        let target = self.available_keys[idx].clone();
        log::debug!("new target {target:?}");

        self.surface
            .set_text(TextSlot::Prompt, &format!("Press: {target}"));
        self.state.target = Some(target.clone());
        self.highlight(&target);
    }

    /// Clear every key back to its default look, then mark `key` as the
    /// pulsing target.
    pub fn highlight(&mut self, key: &str) {
        if let Some(previous) = self.pulsing.take() {
            self.surface.stop_animations(&previous);
        }
        if self.pending_flashes.remove(key).is_some() {
            self.surface.stop_animations(key);
        }

        for label in &self.available_keys {
            if let Some(visual) = self.visuals.get_mut(label) {
                visual.fill = visual.default_fill;
                self.surface.fill_key(label, visual.default_fill);
            }
        }

        if let Some(visual) = self.visuals.get_mut(key) {
            visual.fill = KeyFill::Highlight;
            self.surface.fill_key(key, KeyFill::Highlight);
            self.surface.animate(key, Animation::Pulse);
            self.pulsing = Some(key.to_string());
        }
    }

    pub fn handle_keystroke(&mut self, raw: &str) -> KeystrokeOutcome {
        if !self.started {
            return KeystrokeOutcome::Ignored;
        }

        let pressed = label::normalize(raw);
        if !self.layout.contains(&pressed) {
            log::trace!("ignoring keystroke {raw:?}");
            return KeystrokeOutcome::Ignored;
        }

        if self.state.target.as_deref() == Some(pressed.as_str()) {
            self.on_correct(&pressed);
            KeystrokeOutcome::Correct(pressed)
        } else {
            self.on_incorrect(&pressed);
            KeystrokeOutcome::Incorrect(pressed)
        }
    }

    pub fn on_correct(&mut self, key: &str) {
        self.state.correct += 1;
        log::debug!("correct {key:?} ({})", self.state.score_line());
        self.update_score_display();
        self.flash(key, KeyFill::Success, FlashFollowUp::ChooseNewTarget);
    }

    pub fn on_incorrect(&mut self, key: &str) {
        self.state.incorrect += 1;
        log::debug!(
            "incorrect {key:?}, wanted {:?} ({})",
            self.state.target,
            self.state.score_line()
        );
        self.update_score_display();
        self.flash(key, KeyFill::Error, FlashFollowUp::None);
    }

    /// Replace whatever is animating on `key` with a flash in `fill`. A newer
    /// flash on the same key supersedes the pending one, follow-up included.
    pub fn flash(&mut self, key: &str, fill: KeyFill, follow_up: FlashFollowUp) {
        let Some(visual) = self.visuals.get_mut(key) else {
            return;
        };

        self.surface.stop_animations(key);
        if self.pulsing.as_deref() == Some(key) {
            self.pulsing = None;
        }

        visual.fill = fill;
        self.surface.fill_key(key, fill);
        self.surface.animate(key, Animation::Flash);
        self.pending_flashes.insert(key.to_string(), follow_up);
    }

    /// The flash on `key` has finished. Resets its color before running the
    /// follow-up so a new highlight starts from a clean key.
    pub fn complete_flash(&mut self, key: &str) {
        let Some(follow_up) = self.pending_flashes.remove(key) else {
            return;
        };

        if let Some(visual) = self.visuals.get_mut(key) {
            visual.fill = visual.default_fill;
            self.surface.fill_key(key, visual.default_fill);
        }

        if follow_up == FlashFollowUp::ChooseNewTarget {
            self.choose_new_target();
        }
    }

    pub fn update_score_display(&mut self) {
        self.surface
            .set_text(TextSlot::Score, &self.state.score_line());
    }

    pub fn state(&self) -> &PracticeState {
        &self.state
    }

    pub fn target(&self) -> Option<&str> {
        self.state.target.as_deref()
    }

    pub fn available_keys(&self) -> &[String] {
        &self.available_keys
    }

    pub fn visual(&self, label: &str) -> Option<&KeyVisual> {
        self.visuals.get(label)
    }

    pub fn pulsing(&self) -> Option<&str> {
        self.pulsing.as_deref()
    }

    pub fn has_pending_flash(&self, label: &str) -> bool {
        self.pending_flashes.contains_key(label)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
