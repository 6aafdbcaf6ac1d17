//! Hebrew numerals (gematria) for day numbers.

const UNITS: [char; 9] = ['א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט'];
const TENS: [char; 9] = ['י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ'];
const HUNDREDS: [char; 4] = ['ק', 'ר', 'ש', 'ת'];

/// Render a number below 500 in Hebrew letters.
///
/// 15 and 16 use the customary טו / טז. Zero and values of 500 or more fall
/// back to decimal digits.
#[must_use]
pub fn to_hebrew_numeral(value: u32) -> String {
    if value == 0 || value >= 500 {
        return value.to_string();
    }
    let mut out = String::new();
    let mut rest = value;
    if rest >= 100 {
        out.push(HUNDREDS[(rest / 100 - 1) as usize]);
        rest %= 100;
    }
    match rest {
        15 => out.push_str("טו"),
        16 => out.push_str("טז"),
        _ => {
            if rest >= 10 {
                out.push(TENS[(rest / 10 - 1) as usize]);
            }
            if rest % 10 > 0 {
                out.push(UNITS[(rest % 10 - 1) as usize]);
            }
        }
    }
    out
}

/// Read a Hebrew numeral, ignoring geresh, gershayim and ASCII quotes.
///
/// Returns `None` for empty input or any character that is not a letter value.
#[must_use]
pub fn parse_hebrew_numeral(text: &str) -> Option<u32> {
    let mut total = 0;
    let mut seen = false;
    for c in text.chars() {
        if matches!(c, '"' | '\'' | '׳' | '״') {
            continue;
        }
        total += letter_value(c)?;
        seen = true;
    }
    seen.then_some(total)
}

fn letter_value(c: char) -> Option<u32> {
    let value = match c {
        'ך' => 20,
        'ם' => 40,
        'ן' => 50,
        'ף' => 80,
        'ץ' => 90,
        _ => {
            if let Some(i) = UNITS.iter().position(|&u| u == c) {
                i as u32 + 1
            } else if let Some(i) = TENS.iter().position(|&t| t == c) {
                (i as u32 + 1) * 10
            } else {
                let i = HUNDREDS.iter().position(|&h| h == c)?;
                (i as u32 + 1) * 100
            }
        }
    };
    Some(value)
}
