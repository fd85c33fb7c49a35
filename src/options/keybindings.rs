use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `AddTrail` → `"KeyA"`), using winit
    /// `KeyCode` debug names.
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::AddTrail, "KeyA".into()),
            (KeyAction::ClearTrails, "KeyC".into()),
            (KeyAction::ResetCamera, "KeyR".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }

    /// Bind `action` to `key`, replacing its previous key.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let _ = self.bindings.insert(action, key.into());
        self.rebuild_reverse_map();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_action() {
        let opts = KeybindingOptions::default();
        assert_eq!(opts.lookup("KeyA"), Some(KeyAction::AddTrail));
        assert_eq!(opts.lookup("KeyC"), Some(KeyAction::ClearTrails));
        assert_eq!(opts.lookup("KeyR"), Some(KeyAction::ResetCamera));
        assert_eq!(opts.lookup("KeyZ"), None);
    }

    #[test]
    fn rebinding_moves_the_key() {
        let mut opts = KeybindingOptions::default();
        opts.bind(KeyAction::AddTrail, "Space");
        assert_eq!(opts.lookup("Space"), Some(KeyAction::AddTrail));
        assert_eq!(opts.lookup("KeyA"), None);
    }
}
