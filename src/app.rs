use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::config::Config;
use crate::input;
use crate::keyboard::layout::KeyboardLayout;
use crate::practice::controller::{KeystrokeOutcome, PracticeController};
use crate::ui::stage::Stage;
use crate::ui::theme::Theme;

pub struct App {
    pub controller: PracticeController<Stage>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, theme: &'static Theme, seed: Option<u64>, now: Instant) -> Self {
        let stage = Stage::new(config.animation_timing(), now);
        let layout = KeyboardLayout::qwerty();
        let geometry = config.geometry();
        let mut controller = match seed {
            Some(seed) => PracticeController::with_seed(layout, geometry, stage, seed),
            None => PracticeController::new(layout, geometry, stage),
        };
        controller.start();

        Self {
            controller,
            theme,
            config,
            should_quit: false,
        }
    }

    pub fn stage(&self) -> &Stage {
        self.controller.surface()
    }

    /// Bring the stage clock up to `now` before the keystroke lands, so any
    /// flash it starts is stamped with the time of the key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeystrokeOutcome {
        self.tick(now);
        if input::is_quit(&key) {
            self.should_quit = true;
            return KeystrokeOutcome::Ignored;
        }
        match input::key_identifier(key.code) {
            Some(raw) => self.controller.handle_keystroke(&raw),
            None => KeystrokeOutcome::Ignored,
        }
    }

    /// Advance animations to `now` and feed every finished flash back into the
    /// practice loop, one at a time.
    pub fn tick(&mut self, now: Instant) {
        let finished = self.controller.surface_mut().advance(now);
        for label in finished {
            self.controller.complete_flash(&label);
        }
    }

    pub fn score_line(&self) -> String {
        self.controller.state().score_line()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::keyboard::label;
    use crate::practice::surface::{Animation, TextSlot};

    fn app(start: Instant) -> App {
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        App::new(Config::default(), theme, Some(99), start)
    }

    fn press(app: &mut App, label: &str, at: Instant) -> KeystrokeOutcome {
        let ch = if label == label::SPACE {
            ' '
        } else {
            label.to_lowercase().chars().next().unwrap()
        };
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE), at)
    }

    #[test]
    fn test_app_starts_with_a_target() {
        let app = app(Instant::now());
        let target = app.controller.target().unwrap().to_string();
        assert_eq!(app.stage().text(TextSlot::Prompt), format!("Press: {target}"));
        assert!(app.stage().is_animating(&target, Animation::Pulse));
    }

    #[test]
    fn test_ctrl_c_quits_without_scoring() {
        let now = Instant::now();
        let mut app = app(now);
        let outcome = app.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            now,
        );
        assert_eq!(outcome, KeystrokeOutcome::Ignored);
        assert!(app.should_quit);
        assert_eq!(app.controller.state().total(), 0);
    }

    #[test]
    fn test_escape_is_ignored() {
        let now = Instant::now();
        let mut app = app(now);
        let score = app.stage().text(TextSlot::Score).to_string();
        let outcome = app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), now);
        assert_eq!(outcome, KeystrokeOutcome::Ignored);
        assert!(!app.should_quit);
        assert_eq!(app.stage().text(TextSlot::Score), score);
    }

    #[test]
    fn test_tick_completes_flash_and_advances_target() {
        let start = Instant::now();
        let mut app = app(start);
        let target = app.controller.target().unwrap().to_string();

        press(&mut app, &target, start);
        assert!(app.stage().is_animating(&target, Animation::Flash));

        app.tick(start + Duration::from_millis(100));
        assert!(app.controller.has_pending_flash(&target));

        app.tick(start + Duration::from_millis(200));
        assert!(!app.controller.has_pending_flash(&target));
        let next = app.controller.target().unwrap().to_string();
        assert_eq!(app.stage().text(TextSlot::Prompt), format!("Press: {next}"));
        assert!(app.stage().is_animating(&next, Animation::Pulse));
        assert_eq!(app.score_line(), "Correct: 1 | Incorrect: 0 | Accuracy: 100.0%");
    }

    #[test]
    fn test_flash_runs_full_length_after_idle_spell() {
        let start = Instant::now();
        let mut app = app(start);
        let target = app.controller.target().unwrap().to_string();

        // No tick since start; the key arrives well after the stage clock
        let pressed = start + Duration::from_millis(190);
        press(&mut app, &target, pressed);
        assert!(app.controller.has_pending_flash(&target));

        app.tick(start + Duration::from_millis(200));
        assert!(app.controller.has_pending_flash(&target));
        app.tick(pressed + Duration::from_millis(199));
        assert!(app.controller.has_pending_flash(&target));

        app.tick(pressed + Duration::from_millis(200));
        assert!(!app.controller.has_pending_flash(&target));
        assert_eq!(app.controller.state().correct, 1);
    }

    #[test]
    fn test_keys_alone_drive_flashes_to_completion() {
        let start = Instant::now();
        let mut app = app(start);
        let target = app.controller.target().unwrap().to_string();
        press(&mut app, &target, start);

        // Steady input with no ticks in between
        for step in 1..=10 {
            let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
            app.handle_key(esc, start + Duration::from_millis(25 * step));
        }
        assert!(!app.controller.has_pending_flash(&target));
        let next = app.controller.target().unwrap().to_string();
        assert!(app.stage().is_animating(&next, Animation::Pulse));
        assert_eq!(app.controller.state().correct, 1);
    }
}
