//! Keyboard layout conversion between US-English and Russian ЙЦУКЕН.
//!
//! Text typed with the wrong layout active is re-mapped to the characters
//! produced by the same physical keys in the other layout.

use std::{collections::HashMap, sync::LazyLock};

use tracing::debug;

/// Same physical key, English character first.
const KEY_PAIRS: [(char, char); 74] = [
    // Shifted row symbols and capitals.
    ('@', '"'),
    ('#', '№'),
    ('$', ';'),
    ('^', ':'),
    ('&', '?'),
    ('Q', 'Й'),
    ('W', 'Ц'),
    ('E', 'У'),
    ('R', 'К'),
    ('T', 'Е'),
    ('Y', 'Н'),
    ('U', 'Г'),
    ('I', 'Ш'),
    ('O', 'Щ'),
    ('P', 'З'),
    ('{', 'Х'),
    ('}', 'Ъ'),
    ('|', '/'),
    ('A', 'Ф'),
    ('S', 'Ы'),
    ('D', 'В'),
    ('F', 'А'),
    ('G', 'П'),
    ('H', 'Р'),
    ('J', 'О'),
    ('K', 'Л'),
    ('L', 'Д'),
    (':', 'Ж'),
    ('"', 'Э'),
    ('Z', 'Я'),
    ('X', 'Ч'),
    ('C', 'С'),
    ('V', 'М'),
    ('B', 'И'),
    ('N', 'Т'),
    ('M', 'Ь'),
    ('<', 'Б'),
    ('>', 'Ю'),
    ('?', ','),
    ('~', 'Ё'),
    // Unshifted.
    ('q', 'й'),
    ('w', 'ц'),
    ('e', 'у'),
    ('r', 'к'),
    ('t', 'е'),
    ('y', 'н'),
    ('u', 'г'),
    ('i', 'ш'),
    ('o', 'щ'),
    ('p', 'з'),
    ('[', 'х'),
    (']', 'ъ'),
    ('a', 'ф'),
    ('s', 'ы'),
    ('d', 'в'),
    ('f', 'а'),
    ('g', 'п'),
    ('h', 'р'),
    ('j', 'о'),
    ('k', 'л'),
    ('l', 'д'),
    (';', 'ж'),
    ('\'', 'э'),
    ('z', 'я'),
    ('x', 'ч'),
    ('c', 'с'),
    ('v', 'м'),
    ('b', 'и'),
    ('n', 'т'),
    ('m', 'ь'),
    (',', 'б'),
    ('.', 'ю'),
    ('/', '.'),
    ('`', 'ё'),
];

static EN_TO_RU: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| KEY_PAIRS.iter().copied().collect());

static RU_TO_EN: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| KEY_PAIRS.iter().map(|&(en, ru)| (ru, en)).collect());

/// Which way a piece of text gets re-mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Typed on the English layout, meant as Russian.
    EnToRu,
    /// Typed on the Russian layout, meant as English.
    RuToEn,
}

/// Pick a direction by majority vote.
///
/// A character present on both sides of the table (`,` `.` `;` and a few
/// other punctuation keys) votes English. Ties go to [`Direction::RuToEn`].
pub fn detect_direction(text: &str) -> Direction {
    let (en, ru) = text.chars().fold((0usize, 0usize), |(en, ru), c| {
        if EN_TO_RU.contains_key(&c) {
            (en + 1, ru)
        } else if RU_TO_EN.contains_key(&c) {
            (en, ru + 1)
        } else {
            (en, ru)
        }
    });

    if en > ru {
        Direction::EnToRu
    } else {
        Direction::RuToEn
    }
}

/// Re-map `text` in the given direction. Unmapped characters pass through.
pub fn convert_with(text: &str, direction: Direction) -> String {
    let table = match direction {
        Direction::EnToRu => &*EN_TO_RU,
        Direction::RuToEn => &*RU_TO_EN,
    };

    text.chars()
        .map(|c| table.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Re-map `text` in whichever direction [`detect_direction`] picks.
pub fn convert(text: &str) -> String {
    let direction = detect_direction(text);
    debug!(?direction, text_len = text.len(), "Converting layout");
    convert_with(text, direction)
}
