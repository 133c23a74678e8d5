//=========================================================================
// Gameplay State
//=========================================================================
//
// Two panels, one per note key. G plays the C panel, H plays the D panel;
// each press broadcasts a custom event that lights the matching panel and
// triggers its sound from the bank.
//
//=========================================================================

use keyboard_commander::prelude::*;

//=== Events ==============================================================

pub const KEY_OF_C: GameEvent = GameEvent::custom(1);
pub const KEY_OF_D: GameEvent = GameEvent::custom(2);

//=== Input ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplayCommand {
    GameExit,
    KeyOfCPressed,
    KeyOfDPressed,
}

impl Command for GameplayCommand {}

/// Escape exits, G plays C, H plays D.
#[derive(Debug, Default)]
pub struct GameplayInputMapper;

impl InputMapper for GameplayInputMapper {
    type Command = GameplayCommand;

    fn map(&self, keyboard: &KeyboardSnapshot) -> Vec<GameplayCommand> {
        let mut commands = Vec::new();

        if keyboard.is_key_down(KeyCode::Escape) {
            commands.push(GameplayCommand::GameExit);
        }
        if keyboard.is_key_down(KeyCode::KeyG) {
            commands.push(GameplayCommand::KeyOfCPressed);
        }
        if keyboard.is_key_down(KeyCode::KeyH) {
            commands.push(GameplayCommand::KeyOfDPressed);
        }

        commands
    }
}

//=== Panel ===============================================================

/// Seconds for a lit panel to fade back to its idle shade.
const FADE_SECS: f32 = 0.4;

/// Colored block that lights up when its event is broadcast.
pub struct Panel {
    bounds: Rect,
    color: Color,
    trigger: GameEvent,
    glow: f32,
}

impl Panel {
    pub fn new(bounds: Rect, color: Color, trigger: GameEvent) -> Self {
        Self {
            bounds,
            color,
            trigger,
            glow: 0.0,
        }
    }

    fn shade(&self) -> Color {
        // Idle panels sit at a quarter of their full color.
        let level = 0.25 + 0.75 * self.glow;
        let scale = |c: u8| (c as f32 * level).round() as u8;
        Color::rgb(scale(self.color.r), scale(self.color.g), scale(self.color.b))
    }
}

impl GameObject for Panel {
    fn position(&self) -> Vec2 {
        Vec2::new(self.bounds.x as f32, self.bounds.y as f32)
    }

    fn bounding_boxes(&self) -> Vec<Rect> {
        vec![self.bounds]
    }

    fn update(&mut self, time: FrameTime) {
        self.glow = (self.glow - time.delta_secs() / FADE_SECS).max(0.0);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.fill_rect(self.bounds, self.shade());
    }

    fn on_notify(&mut self, event: &GameEvent) {
        if *event == self.trigger {
            self.glow = 1.0;
        }
    }
}

//=== Gameplay ============================================================

pub struct Gameplay {
    core: StateCore,
    mapper: GameplayInputMapper,
}

impl Gameplay {
    pub fn new() -> Self {
        Self {
            core: StateCore::new(),
            mapper: GameplayInputMapper,
        }
    }
}

impl Default for Gameplay {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Gameplay {
    fn kind(&self) -> &'static str {
        "Gameplay"
    }

    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn set_input_mapper(&mut self) {
        self.mapper = GameplayInputMapper;
    }

    fn load_content(&mut self) -> Result<(), EngineError> {
        let viewport = self.core.viewport();
        let width = viewport.width / 3;
        let height = viewport.height / 2;
        let top = (viewport.height / 4) as i32;

        let layout = [
            (width / 3, Color::rgb(230, 80, 60), KEY_OF_C),
            (width * 2 - width / 3, Color::rgb(60, 160, 230), KEY_OF_D),
        ];
        for (left, color, trigger) in layout {
            let bounds = Rect::new(left as i32, top, width, height);
            self.core.add_object(Panel::new(bounds, color, trigger));
        }

        let font = self.core.load_font("Hud");
        self.core.add_object(
            TextObject::new(font, "G: C   H: D   ESC: quit", Vec2::new(8.0, 8.0))
                .with_color(Color::WHITE)
                .with_z_index(1),
        );

        let key_of_c = self.core.load_sound("KeyOfC");
        let key_of_d = self.core.load_sound("KeyOfD");
        let sound = self.core.sound_mut();
        sound.register_sound(KEY_OF_C, key_of_c);
        sound.register_sound(KEY_OF_D, key_of_d);

        for track in ["Soundtrack1", "Soundtrack2"] {
            let track = self.core.load_sound(track);
            self.core.sound_mut().add_soundtrack(track);
        }

        Ok(())
    }

    fn handle_input(&mut self, keyboard: &KeyboardSnapshot, _time: FrameTime) {
        for command in self.mapper.map(keyboard) {
            match command {
                GameplayCommand::GameExit => self.core.notify_event(GameEvent::GameQuit),
                GameplayCommand::KeyOfCPressed => self.core.notify_event(KEY_OF_C),
                GameplayCommand::KeyOfDPressed => self.core.notify_event(KEY_OF_D),
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
