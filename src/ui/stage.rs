use std::collections::HashMap;
use std::time::Instant;

use crate::keyboard::geometry::KeyPlacement;
use crate::practice::surface::{Animation, KeyFill, KeyVisual, Surface, TextSlot};
use crate::ui::animation::AnimationTiming;

#[derive(Clone, Debug)]
pub struct KeyCell {
    pub placement: KeyPlacement,
    pub fill: KeyFill,
}

#[derive(Clone, Copy, Debug)]
struct Running {
    animation: Animation,
    started: Instant,
}

/// How a key should look at the current stage clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeySample {
    pub fill: KeyFill,
    pub alpha: f64,
    pub scale: f64,
}

/// Terminal-side retained scene: text slots, key cells and the animations
/// running on them. Time only moves when [`advance`](Stage::advance) is called.
pub struct Stage {
    texts: HashMap<TextSlot, String>,
    keys: Vec<KeyCell>,
    index: HashMap<String, usize>,
    running: HashMap<String, Vec<Running>>,
    timing: AnimationTiming,
    now: Instant,
}

impl Stage {
    pub fn new(timing: AnimationTiming, now: Instant) -> Self {
        Self {
            texts: HashMap::new(),
            keys: Vec::new(),
            index: HashMap::new(),
            running: HashMap::new(),
            timing,
            now,
        }
    }

    /// Move the clock to `now` and return the labels whose flash has finished,
    /// in layout order. Finished flashes are dropped from the stage.
    pub fn advance(&mut self, now: Instant) -> Vec<String> {
        if now > self.now {
            self.now = now;
        }

        let now = self.now;
        let timing = &self.timing;
        let mut finished = Vec::new();
        for (label, anims) in self.running.iter_mut() {
            let before = anims.len();
            anims.retain(|r| {
                r.animation != Animation::Flash
                    || !timing.flash_finished(now.saturating_duration_since(r.started))
            });
            if anims.len() != before {
                finished.push(label.clone());
            }
        }
        self.running.retain(|_, anims| !anims.is_empty());

        finished.sort_by_key(|label| self.index.get(label).copied().unwrap_or(usize::MAX));
        finished
    }

    pub fn text(&self, slot: TextSlot) -> &str {
        self.texts.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn keys(&self) -> &[KeyCell] {
        &self.keys
    }

    pub fn key(&self, label: &str) -> Option<&KeyCell> {
        self.index.get(label).map(|&i| &self.keys[i])
    }

    pub fn is_animating(&self, label: &str, animation: Animation) -> bool {
        self.running
            .get(label)
            .is_some_and(|anims| anims.iter().any(|r| r.animation == animation))
    }

    pub fn sample(&self, label: &str) -> Option<KeySample> {
        let cell = self.key(label)?;
        let mut sample = KeySample {
            fill: cell.fill,
            alpha: 1.0,
            scale: 1.0,
        };
        for run in self.running.get(label).into_iter().flatten() {
            let elapsed = self.now.saturating_duration_since(run.started);
            match run.animation {
                Animation::Pulse => sample.alpha = self.timing.pulse_alpha(elapsed),
                Animation::Flash => sample.scale = self.timing.flash_scale(elapsed),
            }
        }
        Some(sample)
    }
}

impl Surface for Stage {
    fn create_text(&mut self, slot: TextSlot, content: &str) {
        self.texts.insert(slot, content.to_string());
    }

    fn set_text(&mut self, slot: TextSlot, content: &str) {
        self.texts.insert(slot, content.to_string());
    }

    fn create_key(&mut self, visual: &KeyVisual) {
        let cell = KeyCell {
            placement: visual.placement.clone(),
            fill: visual.fill,
        };
        match self.index.get(visual.label()) {
            Some(&i) => self.keys[i] = cell,
            None => {
                self.index.insert(visual.label().to_string(), self.keys.len());
                self.keys.push(cell);
            }
        }
    }

    fn fill_key(&mut self, label: &str, fill: KeyFill) {
        if let Some(&i) = self.index.get(label) {
            self.keys[i].fill = fill;
        }
    }

    fn animate(&mut self, label: &str, animation: Animation) {
        let anims = self.running.entry(label.to_string()).or_default();
        anims.retain(|r| r.animation != animation);
        anims.push(Running {
            animation,
            started: self.now,
        });
    }

    fn stop_animations(&mut self, label: &str) {
        self.running.remove(label);
    }
}
