use anyhow::{anyhow, Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Represents a key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    /// Shift on a character key is already encoded in the character itself
    /// ('F' vs 'f'), so it is dropped to keep lookups terminal-independent.
    pub fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        let modifiers = match key {
            KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
            _ => modifiers,
        };
        Self { key, modifiers }
    }

    pub fn simple(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::empty())
    }

    pub fn with_ctrl(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::CONTROL)
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }

        let key_str = match self.key {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Esc => "Esc".to_string(),
            _ => format!("{:?}", self.key),
        };

        parts.push(key_str);
        write!(f, "{}", parts.join("+"))
    }
}

impl FromStr for KeyCombination {
    type Err = anyhow::Error;

    /// Parses the same notation `Display` produces, e.g. `Ctrl+c`, `PageDown`.
    fn from_str(s: &str) -> Result<Self> {
        let (prefix, key_part) = match s.strip_suffix('+') {
            // "+" itself as the key, bare or after a modifier ("Ctrl++")
            Some(rest) if rest.is_empty() || rest.ends_with('+') => {
                (rest.strip_suffix('+').unwrap_or(rest), "+")
            }
            _ => s.rsplit_once('+').unwrap_or(("", s)),
        };
        if key_part.is_empty() {
            return Err(anyhow!("Empty key binding: {:?}", s));
        }

        let mut modifiers = KeyModifiers::empty();
        for modifier in prefix.split('+').filter(|m| !m.is_empty()) {
            modifiers |= match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(anyhow!("Unknown modifier {:?} in {:?}", other, s)),
            };
        }

        let key = parse_key_code(key_part).with_context(|| format!("Invalid key binding {:?}", s))?;
        Ok(Self::new(key, modifiers))
    }
}

fn parse_key_code(name: &str) -> Result<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let key = match name.to_ascii_lowercase().as_str() {
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        other => match other.strip_prefix('f').map(str::parse::<u8>) {
            Some(Ok(n)) if (1..=24).contains(&n) => KeyCode::F(n),
            _ => return Err(anyhow!("Unknown key {:?}", name)),
        },
    };
    Ok(key)
}

/// Everything the presenter can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideAction {
    Next,
    Previous,
    First,
    Last,
    ToggleFullscreen,
    Quit,
}

/// Key mapping configuration that maps key combinations to actions
#[derive(Debug, Clone)]
pub struct KeyMapping {
    mappings: HashMap<KeyCombination, SlideAction>,
}

impl KeyMapping {
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    pub fn add_mapping(&mut self, key_combo: KeyCombination, action: SlideAction) {
        self.mappings.insert(key_combo, action);
    }

    pub fn remove_mapping(&mut self, key_combo: KeyCombination) {
        self.mappings.remove(&key_combo);
    }

    pub fn get_action(&self, key: KeyCode, modifiers: KeyModifiers) -> Option<SlideAction> {
        self.mappings.get(&KeyCombination::new(key, modifiers)).copied()
    }

    /// Get all key combinations for a specific action, in display order
    pub fn get_keys_for_action(&self, action: SlideAction) -> Vec<KeyCombination> {
        let mut keys: Vec<KeyCombination> = self
            .mappings
            .iter()
            .filter(|(_, &a)| a == action)
            .map(|(&k, _)| k)
            .collect();
        keys.sort_by_key(|k| k.to_string());
        keys
    }

    pub fn is_mapped(&self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.mappings.contains_key(&KeyCombination::new(key, modifiers))
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Default for KeyMapping {
    fn default() -> Self {
        let mut mapping = Self::new();

        // Advance
        mapping.add_mapping(KeyCombination::simple(KeyCode::Right), SlideAction::Next);
        mapping.add_mapping(KeyCombination::simple(KeyCode::Down), SlideAction::Next);
        mapping.add_mapping(KeyCombination::simple(KeyCode::Char(' ')), SlideAction::Next);
        mapping.add_mapping(KeyCombination::simple(KeyCode::PageDown), SlideAction::Next);

        // Retreat
        mapping.add_mapping(KeyCombination::simple(KeyCode::Left), SlideAction::Previous);
        mapping.add_mapping(KeyCombination::simple(KeyCode::Up), SlideAction::Previous);
        mapping.add_mapping(KeyCombination::simple(KeyCode::PageUp), SlideAction::Previous);

        // Jumps
        mapping.add_mapping(KeyCombination::simple(KeyCode::Home), SlideAction::First);
        mapping.add_mapping(KeyCombination::simple(KeyCode::End), SlideAction::Last);

        mapping.add_mapping(KeyCombination::simple(KeyCode::Char('f')), SlideAction::ToggleFullscreen);
        mapping.add_mapping(KeyCombination::simple(KeyCode::Char('F')), SlideAction::ToggleFullscreen);

        mapping.add_mapping(KeyCombination::simple(KeyCode::Char('q')), SlideAction::Quit);
        mapping.add_mapping(KeyCombination::simple(KeyCode::Esc), SlideAction::Quit);
        mapping.add_mapping(KeyCombination::with_ctrl(KeyCode::Char('c')), SlideAction::Quit);

        mapping
    }
}

/// Key bindings as written in the config file. An action left empty keeps
/// its default keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default)]
    pub next: Vec<String>,
    #[serde(default)]
    pub previous: Vec<String>,
    #[serde(default)]
    pub first: Vec<String>,
    #[serde(default)]
    pub last: Vec<String>,
    #[serde(default)]
    pub fullscreen: Vec<String>,
    #[serde(default)]
    pub quit: Vec<String>,
}

impl KeyBindings {
    fn entries(&self) -> [(SlideAction, &Vec<String>); 6] {
        [
            (SlideAction::Next, &self.next),
            (SlideAction::Previous, &self.previous),
            (SlideAction::First, &self.first),
            (SlideAction::Last, &self.last),
            (SlideAction::ToggleFullscreen, &self.fullscreen),
            (SlideAction::Quit, &self.quit),
        ]
    }

    /// Builds the lookup table: defaults first, then every overridden action
    /// replaced wholesale by its configured keys.
    pub fn to_mapping(&self) -> Result<KeyMapping> {
        let mut mapping = KeyMapping::default();

        for (action, keys) in self.entries() {
            if keys.is_empty() {
                continue;
            }
            for combo in mapping.get_keys_for_action(action) {
                mapping.remove_mapping(combo);
            }
            for key in keys {
                let combo: KeyCombination = key.parse()?;
                mapping.add_mapping(combo, action);
            }
        }

        Ok(mapping)
    }
}
