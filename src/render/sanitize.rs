//! Unicode to ASCII sanitization for the standard PDF fonts.
//!
//! The built-in Type1 fonts only cover printable ASCII reliably, so every
//! piece of text is passed through [`sanitize`] before it is measured or
//! written. Known symbols are approximated from a fixed table; anything else
//! outside printable ASCII is dropped.

use unicode_normalization::UnicodeNormalization;

/// Typographic punctuation, spaces and arrows.
const PUNCTUATION: &[(char, &str)] = &[
    ('\u{2018}', "'"),   // ‘
    ('\u{2019}', "'"),   // ’
    ('\u{201A}', "'"),   // ‚
    ('\u{201B}', "'"),   // ‛
    ('\u{2032}', "'"),   // ′
    ('\u{201C}', "\""),  // “
    ('\u{201D}', "\""),  // ”
    ('\u{201E}', "\""),  // „
    ('\u{2033}', "\""),  // ″
    ('\u{00AB}', "<<"),  // «
    ('\u{00BB}', ">>"),  // »
    ('\u{2039}', "<"),   // ‹
    ('\u{203A}', ">"),   // ›
    ('\u{2010}', "-"),   // ‐
    ('\u{2011}', "-"),   // ‑
    ('\u{2012}', "-"),   // ‒
    ('\u{2013}', "-"),   // –
    ('\u{2014}', "-"),   // —
    ('\u{2015}', "-"),   // ―
    ('\u{2212}', "-"),   // −
    ('\u{2026}', "..."), // …
    ('\u{2022}', "*"),   // •
    ('\u{25CF}', "*"),   // ●
    ('\u{25E6}', "o"),   // ◦
    ('\u{00B7}', "-"),   // ·
    ('\u{00A0}', " "),   // no-break space
    ('\u{2002}', " "),   // en space
    ('\u{2003}', " "),   // em space
    ('\u{2009}', " "),   // thin space
    ('\u{202F}', " "),   // narrow no-break space
    ('\u{2192}', "->"),  // →
    ('\u{2190}', "<-"),  // ←
    ('\u{2191}', "^"),   // ↑
    ('\u{2193}', "v"),   // ↓
    ('\u{2194}', "<->"), // ↔
    ('\u{21D2}', "=>"),  // ⇒
    ('\u{21D0}', "<="),  // ⇐
    ('\u{27A1}', "->"),  // ➡
    ('\u{00A9}', "(c)"), // ©
    ('\u{00AE}', "(R)"), // ®
    ('\u{2122}', "(TM)"), // ™
    ('\u{00A7}', "S"),   // §
    ('\u{00B6}', "P"),   // ¶
];

/// Accented and ligature Latin letters.
const LETTERS: &[(char, &str)] = &[
    ('à', "a"), ('á', "a"), ('â', "a"), ('ã', "a"), ('ä', "a"), ('å', "a"), ('ā', "a"),
    ('À', "A"), ('Á', "A"), ('Â', "A"), ('Ã', "A"), ('Ä', "A"), ('Å', "A"), ('Ā', "A"),
    ('è', "e"), ('é', "e"), ('ê', "e"), ('ë', "e"), ('ē', "e"), ('ę', "e"), ('ě', "e"),
    ('È', "E"), ('É', "E"), ('Ê', "E"), ('Ë', "E"), ('Ē', "E"), ('Ę', "E"), ('Ě', "E"),
    ('ì', "i"), ('í', "i"), ('î', "i"), ('ï', "i"), ('ī', "i"),
    ('Ì', "I"), ('Í', "I"), ('Î', "I"), ('Ï', "I"), ('Ī', "I"),
    ('ò', "o"), ('ó', "o"), ('ô', "o"), ('õ', "o"), ('ö', "o"), ('ø', "o"), ('ō', "o"), ('ő', "o"),
    ('Ò', "O"), ('Ó', "O"), ('Ô', "O"), ('Õ', "O"), ('Ö', "O"), ('Ø', "O"), ('Ō', "O"), ('Ő', "O"),
    ('ù', "u"), ('ú', "u"), ('û', "u"), ('ü', "u"), ('ū', "u"), ('ů', "u"), ('ű', "u"),
    ('Ù', "U"), ('Ú', "U"), ('Û', "U"), ('Ü', "U"), ('Ū', "U"), ('Ů', "U"), ('Ű', "U"),
    ('ý', "y"), ('ÿ', "y"), ('Ý', "Y"), ('Ÿ', "Y"),
    ('ç', "c"), ('ć', "c"), ('č', "c"), ('Ç', "C"), ('Ć', "C"), ('Č', "C"),
    ('ñ', "n"), ('ń', "n"), ('ň', "n"), ('Ñ', "N"), ('Ń', "N"), ('Ň', "N"),
    ('ś', "s"), ('š', "s"), ('ş', "s"), ('Ś', "S"), ('Š', "S"), ('Ş', "S"),
    ('ź', "z"), ('ż', "z"), ('ž', "z"), ('Ź', "Z"), ('Ż', "Z"), ('Ž', "Z"),
    ('ł', "l"), ('Ł', "L"), ('đ', "d"), ('Đ', "D"), ('ř', "r"), ('Ř', "R"),
    ('ğ', "g"), ('Ğ', "G"), ('ť', "t"), ('Ť', "T"),
    ('ß', "ss"), ('æ', "ae"), ('Æ', "AE"), ('œ', "oe"), ('Œ', "OE"),
    ('ð', "d"), ('Ð', "D"), ('þ', "th"), ('Þ', "Th"),
    ('\u{FB00}', "ff"), ('\u{FB01}', "fi"), ('\u{FB02}', "fl"), ('\u{FB03}', "ffi"), ('\u{FB04}', "ffl"),
];

/// Currency signs as ISO codes.
const CURRENCY: &[(char, &str)] = &[
    ('€', "EUR"),
    ('£', "GBP"),
    ('¥', "JPY"),
    ('₹', "INR"),
    ('₩', "KRW"),
    ('₽', "RUB"),
    ('₺', "TRY"),
    ('₿', "BTC"),
    ('¢', "USc"),
];

/// Math signs, fractions and superscripts.
const MATH: &[(char, &str)] = &[
    ('×', "x"),
    ('÷', "/"),
    ('±', "+/-"),
    ('≤', "<="),
    ('≥', ">="),
    ('≠', "!="),
    ('≈', "~"),
    ('∞', "inf"),
    ('°', " deg"),
    ('‰', " per mille"),
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅛', "1/8"),
    ('⁰', "^0"),
    ('¹', "^1"),
    ('²', "^2"),
    ('³', "^3"),
    ('⁴', "^4"),
    ('⁵', "^5"),
    ('µ', "u"),
];

/// Status emoji that carry meaning in reports.
const STATUS_TAGS: &[(char, &str)] = &[
    ('\u{26A0}', "[!]"),      // ⚠
    ('\u{2757}', "[!]"),      // ❗
    ('\u{203C}', "[!!]"),     // ‼
    ('\u{1F6A8}', "[!!]"),    // 🚨
    ('\u{2705}', "[v]"),      // ✅
    ('\u{2714}', "[v]"),      // ✔
    ('\u{2713}', "[v]"),      // ✓
    ('\u{2611}', "[v]"),      // ☑
    ('\u{274C}', "[x]"),      // ❌
    ('\u{2716}', "[x]"),      // ✖
    ('\u{2717}', "[x]"),      // ✗
    ('\u{1F6AB}', "[BLOCKED]"), // 🚫
    ('\u{26D4}', "[BLOCKED]"), // ⛔
    ('\u{23F0}', "[DUE]"),    // ⏰
    ('\u{23F3}', "[WAIT]"),   // ⏳
    ('\u{1F3AF}', "[GOAL]"),  // 🎯
    ('\u{1F4C8}', "[UP]"),    // 📈
    ('\u{1F4C9}', "[DOWN]"),  // 📉
    ('\u{1F4CA}', "[CHART]"), // 📊
    ('\u{1F4A1}', "[TIP]"),   // 💡
    ('\u{2139}', "[i]"),      // ℹ
    ('\u{2753}', "[?]"),      // ❓
    ('\u{2B50}', "[*]"),      // ⭐
    ('\u{1F534}', "[RED]"),   // 🔴
    ('\u{1F7E1}', "[AMBER]"), // 🟡
    ('\u{1F7E2}', "[GREEN]"), // 🟢
];

/// All substitution tables, consulted in order.
const TABLES: &[&[(char, &str)]] = &[PUNCTUATION, LETTERS, CURRENCY, MATH, STATUS_TAGS];

/// Look up the ASCII replacement for a character.
pub fn replacement(c: char) -> Option<&'static str> {
    TABLES
        .iter()
        .flat_map(|table| table.iter())
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Whether the character survives sanitization unchanged.
fn is_kept(c: char) -> bool {
    matches!(c, ' '..='~' | '\n' | '\t')
}

/// Convert text to printable ASCII.
///
/// Text is NFC-normalized, table entries are substituted, and every other
/// character outside printable ASCII (newlines and tabs excepted) is
/// deleted. Never fails; sanitizing twice gives the same result.
pub fn sanitize(text: &str) -> String {
    if is_sanitized(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        if is_kept(c) {
            out.push(c);
        } else if let Some(ascii) = replacement(c) {
            out.push_str(ascii);
        }
    }
    out
}

/// Check if text is already sanitized.
pub fn is_sanitized(text: &str) -> bool {
    text.chars().all(is_kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_punctuation() {
        assert_eq!(sanitize("“Done” – it’s shipped…"), "\"Done\" - it's shipped...");
        assert_eq!(sanitize("A → B"), "A -> B");
    }

    #[test]
    fn test_accents_and_ligatures() {
        assert_eq!(sanitize("Café Müller façade"), "Cafe Muller facade");
        assert_eq!(sanitize("Straße"), "Strasse");
        assert_eq!(sanitize("\u{FB01}nal"), "final");
    }

    #[test]
    fn test_decomposed_accents_are_composed_first() {
        // e + combining acute
        assert_eq!(sanitize("Cafe\u{0301}"), "Cafe");
        assert_eq!(sanitize("Jose\u{0301} Nun\u{0303}ez"), "Jose Nunez");
    }

    #[test]
    fn test_currency_and_math() {
        assert_eq!(sanitize("€500 or £20"), "EUR500 or GBP20");
        assert_eq!(sanitize("3×4 ÷ 2 ≥ ½"), "3x4 / 2 >= 1/2");
        assert_eq!(sanitize("m²"), "m^2");
    }

    #[test]
    fn test_status_emoji() {
        assert_eq!(sanitize("⚠️ **WARNING**"), "[!] **WARNING**");
        assert_eq!(sanitize("✅ on track"), "[v] on track");
        assert_eq!(sanitize("❌ failed"), "[x] failed");
        assert_eq!(sanitize("🎯 Goals"), "[GOAL] Goals");
    }

    #[test]
    fn test_unmapped_characters_are_deleted() {
        assert_eq!(sanitize("Launch 🚀 day"), "Launch  day");
        assert_eq!(sanitize("漢字"), "");
        assert_eq!(sanitize("zero\u{200B}width"), "zerowidth");
        assert_eq!(sanitize("bell\u{7}"), "bell");
    }

    #[test]
    fn test_whitespace_controls_kept() {
        assert_eq!(sanitize("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_replacements_are_ascii() {
        for table in TABLES {
            for (from, to) in table.iter() {
                assert!(!is_kept(*from), "{:?} is already ASCII", from);
                assert!(to.chars().all(is_kept), "{:?} maps to non-ASCII", from);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent_ascii(text in any::<String>()) {
            let once = sanitize(&text);
            prop_assert!(is_sanitized(&once), "unprintable output {:?}", once);
            prop_assert!(once.is_ascii());
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn prop_sanitize_keeps_printable_ascii(text in "[ -~\t\n]*") {
            prop_assert_eq!(sanitize(&text), text);
        }
    }
}
