//=========================================================================
// Input Mapping
//=========================================================================
//
// Game-defined command vocabularies and the mappers that produce them.
//
// Architecture:
//   KeyboardSnapshot → InputMapper::map() → Vec<Command>
//
// Every game state picks its own mapper, so the same key can mean
// "start" on a title screen and "fire" during gameplay.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, Modifiers};
use super::keyboard::KeyboardSnapshot;

//=== Command Trait =======================================================

/// Marker trait for game-defined command enums.
///
/// Commands represent one frame of user intent (Quit, Fire, Confirm)
/// derived from raw keys. The engine routes them without interpreting
/// them.
///
/// ```
/// use keyboard_commander::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MenuCommand { Start, Quit }
///
/// impl Command for MenuCommand {}
/// ```
pub trait Command: 'static + Copy + Eq + Hash + Debug {}

//=== InputMapper Trait ===================================================

/// Pure translation from a keyboard snapshot to commands.
///
/// Implementations must be deterministic: the same snapshot always yields
/// the same sequence. Callers treat the result as a set, so a command
/// appears at most once.
pub trait InputMapper {
    type Command: Command;

    fn map(&self, keyboard: &KeyboardSnapshot) -> Vec<Self::Command>;
}

//=== KeyBindings =========================================================

#[derive(Debug, Clone, Copy)]
struct Binding<C: Command> {
    key: KeyCode,
    modifiers: Option<Modifiers>,
    command: C,
}

/// Table-driven mapper: held keys resolve to commands in binding order.
///
/// A binding made with [`bind_key`](Self::bind_key) matches regardless of
/// modifiers; [`bind_key_with_mods`](Self::bind_key_with_mods) requires an
/// exact modifier match, so Ctrl+S does not trigger a Shift+Ctrl+S binding.
///
/// ```
/// use keyboard_commander::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Cmd { Fire, Save }
/// impl Command for Cmd {}
///
/// let bindings = KeyBindings::new()
///     .bind_key(KeyCode::Space, Cmd::Fire)
///     .bind_key_with_mods(KeyCode::KeyS, Modifiers::CTRL, Cmd::Save);
///
/// let keys = KeyboardSnapshot::from_keys([KeyCode::Space]);
/// assert_eq!(bindings.map(&keys), vec![Cmd::Fire]);
/// ```
#[derive(Debug, Clone)]
pub struct KeyBindings<C: Command> {
    bindings: Vec<Binding<C>>,
}

impl<C: Command> KeyBindings<C> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to a command (any modifiers).
    pub fn bind_key(mut self, key: KeyCode, command: C) -> Self {
        self.bindings.push(Binding {
            key,
            modifiers: None,
            command,
        });
        self
    }

    /// Binds a key with modifiers to a command (exact match required).
    pub fn bind_key_with_mods(mut self, key: KeyCode, modifiers: Modifiers, command: C) -> Self {
        self.bindings.push(Binding {
            key,
            modifiers: Some(modifiers),
            command,
        });
        self
    }

    /// Removes every binding for a key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.bindings.retain(|binding| binding.key != key);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<C: Command> Default for KeyBindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Command> InputMapper for KeyBindings<C> {
    type Command = C;

    fn map(&self, keyboard: &KeyboardSnapshot) -> Vec<C> {
        let mut commands: Vec<C> = Vec::new();

        for binding in &self.bindings {
            if !keyboard.is_key_down(binding.key) {
                continue;
            }

            if let Some(modifiers) = binding.modifiers {
                if modifiers != keyboard.modifiers() {
                    continue;
                }
            }

            if !commands.contains(&binding.command) {
                commands.push(binding.command);
            }
        }

        commands
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestCommand {
        Jump,
        Shoot,
        Save,
    }

    impl Command for TestCommand {}

    fn keys(keys: &[KeyCode]) -> KeyboardSnapshot {
        KeyboardSnapshot::from_keys(keys.iter().copied())
    }

    //=====================================================================
    // Basic Binding Tests
    //=====================================================================

    #[test]
    fn bind_and_map_simple_key() {
        let mapper = KeyBindings::new().bind_key(KeyCode::Space, TestCommand::Jump);
        assert_eq!(mapper.map(&keys(&[KeyCode::Space])), vec![TestCommand::Jump]);
    }

    #[test]
    fn unbound_keys_produce_nothing() {
        let mapper = KeyBindings::new().bind_key(KeyCode::Space, TestCommand::Jump);
        assert!(mapper.map(&keys(&[KeyCode::KeyQ])).is_empty());
        assert!(mapper.map(&KeyboardSnapshot::default()).is_empty());
    }

    #[test]
    fn commands_follow_binding_order() {
        let mapper = KeyBindings::new()
            .bind_key(KeyCode::KeyZ, TestCommand::Shoot)
            .bind_key(KeyCode::KeyA, TestCommand::Jump);

        let commands = mapper.map(&keys(&[KeyCode::KeyA, KeyCode::KeyZ]));
        assert_eq!(commands, vec![TestCommand::Shoot, TestCommand::Jump]);
    }

    #[test]
    fn duplicate_commands_collapse() {
        let mapper = KeyBindings::new()
            .bind_key(KeyCode::Space, TestCommand::Jump)
            .bind_key(KeyCode::ArrowUp, TestCommand::Jump);

        let commands = mapper.map(&keys(&[KeyCode::Space, KeyCode::ArrowUp]));
        assert_eq!(commands, vec![TestCommand::Jump]);
    }

    #[test]
    fn mapping_is_deterministic() {
        let mapper = KeyBindings::new()
            .bind_key(KeyCode::KeyG, TestCommand::Jump)
            .bind_key(KeyCode::KeyH, TestCommand::Shoot);
        let snapshot = keys(&[KeyCode::KeyH, KeyCode::KeyG]);

        assert_eq!(mapper.map(&snapshot), mapper.map(&snapshot));
    }

    //=====================================================================
    // Modifier Tests
    //=====================================================================

    #[test]
    fn modifiers_must_match_exactly() {
        let mapper = KeyBindings::new()
            .bind_key_with_mods(KeyCode::KeyS, Modifiers::CTRL, TestCommand::Save);

        assert!(mapper.map(&keys(&[KeyCode::KeyS])).is_empty());

        let ctrl_s = keys(&[KeyCode::KeyS]).with_modifiers(Modifiers::CTRL);
        assert_eq!(mapper.map(&ctrl_s), vec![TestCommand::Save]);

        let shift_ctrl_s = keys(&[KeyCode::KeyS]).with_modifiers(Modifiers::SHIFT_CTRL);
        assert!(mapper.map(&shift_ctrl_s).is_empty());
    }

    #[test]
    fn plain_binding_ignores_modifiers() {
        let mapper = KeyBindings::new().bind_key(KeyCode::KeyS, TestCommand::Shoot);
        let ctrl_s = keys(&[KeyCode::KeyS]).with_modifiers(Modifiers::CTRL);
        assert_eq!(mapper.map(&ctrl_s), vec![TestCommand::Shoot]);
    }

    #[test]
    fn unbind_removes_all_variants() {
        let mut mapper = KeyBindings::new()
            .bind_key(KeyCode::KeyS, TestCommand::Shoot)
            .bind_key_with_mods(KeyCode::KeyS, Modifiers::CTRL, TestCommand::Save)
            .bind_key(KeyCode::Space, TestCommand::Jump);

        mapper.unbind_key(KeyCode::KeyS);

        assert_eq!(mapper.len(), 1);
        assert!(mapper.map(&keys(&[KeyCode::KeyS])).is_empty());
    }
}
