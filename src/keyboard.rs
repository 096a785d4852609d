use std::collections::HashMap;

pub const NUM_KEYS: u8 = 16;

/// Something that can report which hex key is currently held down.
///
/// The interpreter samples its source right before every instruction that reads
/// the keypad, it never looks at host input itself.
pub trait KeySource {
    fn pressed_key(&self) -> Option<u8>;
}

/// A keypad nobody touches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoKeys;

impl KeySource for NoKeys {
    fn pressed_key(&self) -> Option<u8> {
        None
    }
}

/// A keypad with at most one key held down until changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldKey(pub Option<u8>);

impl KeySource for HeldKey {
    fn pressed_key(&self) -> Option<u8> {
        self.0
    }
}

/// The key the interpreter last sampled from its [`KeySource`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pressed_key: Option<u8>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self { pressed_key: None }
    }

    /// Latches the current key of `source`. Codes above `0xF` are treated as no key.
    pub fn sample(&mut self, source: &dyn KeySource) -> Option<u8> {
        self.pressed_key = source.pressed_key().filter(|key| *key < NUM_KEYS);
        self.pressed_key
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed_key == Some(key)
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed_key.is_some()
    }

    pub fn pressed_key(&self) -> Option<u8> {
        self.pressed_key
    }
}

/// Translates host keys to keypad codes.
///
/// The default layout maps the left hand block of a QWERTY keyboard onto the
/// COSMAC VIP keypad:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r  ->  4 5 6 D
/// a s d f      7 8 9 E
/// z x c v      A 0 B F
/// ```
#[derive(Debug, Clone)]
pub struct Keymap(HashMap<char, u8>);

impl Keymap {
    pub fn translate(&self, key: char) -> Option<u8> {
        self.0.get(&key.to_ascii_lowercase()).copied()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Keymap(HashMap::from([
            ('1', 0x1),
            ('2', 0x2),
            ('3', 0x3),
            ('4', 0xC),
            ('q', 0x4),
            ('w', 0x5),
            ('e', 0x6),
            ('r', 0xD),
            ('a', 0x7),
            ('s', 0x8),
            ('d', 0x9),
            ('f', 0xE),
            ('z', 0xA),
            ('x', 0x0),
            ('c', 0xB),
            ('v', 0xF),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_none, assert_some};
    use test_case::test_case;

    #[test]
    fn test_sample_latches_key() {
        let mut keyboard = Keyboard::new();

        assert_eq!(keyboard.sample(&HeldKey(Some(0xA))), Some(0xA));

        assert!(keyboard.is_pressed(0xA));
        assert!(!keyboard.is_pressed(0xB));
        assert!(keyboard.any_pressed());
    }

    #[test]
    fn test_sample_releases_key() {
        let mut keyboard = Keyboard::new();
        keyboard.sample(&HeldKey(Some(0x4)));

        keyboard.sample(&NoKeys);

        assert_none!(keyboard.pressed_key());
        assert!(!keyboard.any_pressed());
    }

    #[test]
    fn test_sample_ignores_invalid_codes() {
        let mut keyboard = Keyboard::new();

        assert_none!(keyboard.sample(&HeldKey(Some(0x10))));
    }

    #[test_case('1', 0x1)]
    #[test_case('4', 0xC)]
    #[test_case('x', 0x0)]
    #[test_case('V', 0xF)]
    fn test_keymap_translate(key: char, code: u8) {
        assert_eq!(Keymap::default().translate(key), Some(code));
    }

    #[test]
    fn test_keymap_covers_every_code() {
        let keymap = Keymap::default();

        for code in 0..NUM_KEYS {
            assert_some!(keymap.0.values().find(|c| **c == code));
        }
        assert_none!(keymap.translate('p'));
    }
}
