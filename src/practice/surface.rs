use crate::keyboard::geometry::KeyPlacement;

/// Fixed text elements of the practice screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Title,
    Instructions,
    Score,
    Prompt,
}

/// Semantic key colors. The theme decides what they look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyFill {
    Default,
    Highlight,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animation {
    /// Repeating opacity oscillation on the target key. Never finishes.
    Pulse,
    /// Short scale-up-and-back emphasis. The host reports completion through
    /// [`PracticeController::complete_flash`](crate::practice::controller::PracticeController::complete_flash).
    Flash,
}

/// Per-key visual record owned by the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyVisual {
    pub placement: KeyPlacement,
    pub default_fill: KeyFill,
    pub fill: KeyFill,
}

impl KeyVisual {
    pub fn new(placement: KeyPlacement) -> Self {
        Self {
            placement,
            default_fill: KeyFill::Default,
            fill: KeyFill::Default,
        }
    }

    pub fn label(&self) -> &str {
        &self.placement.label
    }
}

/// Drawing and animation services the practice controller drives.
pub trait Surface {
    fn create_text(&mut self, slot: TextSlot, content: &str);
    fn set_text(&mut self, slot: TextSlot, content: &str);
    fn create_key(&mut self, visual: &KeyVisual);
    fn fill_key(&mut self, label: &str, fill: KeyFill);
    fn animate(&mut self, label: &str, animation: Animation);
    /// Stop every animation running on `label`. Stopped flashes never complete.
    fn stop_animations(&mut self, label: &str);
}
