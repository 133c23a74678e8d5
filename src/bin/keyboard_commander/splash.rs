//=========================================================================
// Splash State
//=========================================================================

use keyboard_commander::prelude::*;

use crate::gameplay::Gameplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SplashCommand {
    Start,
    Quit,
}

impl Command for SplashCommand {}

/// Title screen: Enter starts the game, Escape quits.
pub struct Splash {
    core: StateCore,
    bindings: KeyBindings<SplashCommand>,
}

impl Splash {
    pub fn new() -> Self {
        Self {
            core: StateCore::new(),
            bindings: KeyBindings::new(),
        }
    }

    fn centered_label(&mut self, font: &Font, text: &str, y: f32, color: Color) {
        let width = font.measure(text).width as f32;
        let x = (self.core.viewport().width as f32 - width) / 2.0;
        self.core
            .add_object(TextObject::new(font.clone(), text, Vec2::new(x.max(0.0), y)).with_color(color));
    }
}

impl Default for Splash {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Splash {
    fn kind(&self) -> &'static str {
        "Splash"
    }

    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn set_input_mapper(&mut self) {
        self.bindings = KeyBindings::new()
            .bind_key(KeyCode::Enter, SplashCommand::Start)
            .bind_key(KeyCode::Escape, SplashCommand::Quit);
    }

    fn load_content(&mut self) -> Result<(), EngineError> {
        let font = self.core.load_font("Hud");
        let third = self.core.viewport().height as f32 / 3.0;

        self.centered_label(&font, "KEYBOARD COMMANDER", third, Color::WHITE);
        self.centered_label(&font, "ENTER: start   ESC: quit", third * 2.0, Color::rgb(200, 200, 200));

        let theme = self.core.load_sound("Title");
        self.core.sound_mut().add_soundtrack(theme);
        Ok(())
    }

    fn handle_input(&mut self, keyboard: &KeyboardSnapshot, _time: FrameTime) {
        for command in self.bindings.map(keyboard) {
            match command {
                SplashCommand::Start => self.core.switch_state(Box::new(Gameplay::new())),
                SplashCommand::Quit => self.core.notify_event(GameEvent::GameQuit),
            }
        }
    }

    fn update_game_state(&mut self, time: FrameTime) -> Result<(), EngineError> {
        self.core.update_objects(time);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
