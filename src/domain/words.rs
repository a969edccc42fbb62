use super::{dong_toward_zero, Dong};

const DIGITS: [&str; 10] = [
    "không", "một", "hai", "ba", "bốn", "năm", "sáu", "bảy", "tám", "chín",
];

/// Scale words inside one thousand-million cycle. Higher positions repeat
/// the cycle with an extra "tỷ" each time.
const UNITS: [&str; 3] = ["", "nghìn", "triệu"];
const BILLION: &str = "tỷ";

const ZERO_TEXT: &str = "Không đồng";
const NEGATIVE_PREFIX: &str = "âm ";
const CURRENCY_SUFFIX: &str = " đồng chẵn";

/// Three decimal digits of an amount, taken from the least-significant end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitGroup {
    pub hundreds: u8,
    pub tens: u8,
    pub ones: u8,
}

impl DigitGroup {
    pub fn new(value: u16) -> Self {
        debug_assert!(value < 1000, "digit group out of range: {}", value);
        Self {
            hundreds: (value / 100) as u8,
            tens: (value / 10 % 10) as u8,
            ones: (value % 10) as u8,
        }
    }

    pub fn value(&self) -> u16 {
        self.hundreds as u16 * 100 + self.tens as u16 * 10 + self.ones as u16
    }

    pub fn is_zero(&self) -> bool {
        self.value() == 0
    }
}

/// Split a magnitude into 3-digit groups, units group first.
/// Always returns at least one group.
pub fn digit_groups(mut magnitude: u64) -> Vec<DigitGroup> {
    let mut groups = Vec::new();
    loop {
        groups.push(DigitGroup::new((magnitude % 1000) as u16));
        magnitude /= 1000;
        if magnitude == 0 {
            return groups;
        }
    }
}

/// Scale word for the group at `position`, counted from the units group.
/// Example: 1 -> "nghìn", 3 -> "tỷ", 5 -> "triệu tỷ", 6 -> "tỷ tỷ"
pub fn scale_word(position: usize) -> String {
    let base = UNITS[position % 3];
    let billions = position / 3;

    let mut words = Vec::with_capacity(billions + 1);
    if !base.is_empty() {
        words.push(base);
    }
    words.extend(std::iter::repeat(BILLION).take(billions));
    words.join(" ")
}

/// Read one digit group. `is_first_group_from_left` marks the most
/// significant non-zero group, which never says "không trăm".
pub fn read_three_digits(group: DigitGroup, is_first_group_from_left: bool) -> String {
    let DigitGroup {
        hundreds: h,
        tens: t,
        ones: o,
    } = group;
    let mut res = String::new();

    if !is_first_group_from_left || h > 0 {
        res.push_str(DIGITS[h as usize]);
        res.push_str(" trăm ");
    }

    if t > 1 {
        res.push_str(DIGITS[t as usize]);
        res.push_str(" mươi ");
    } else if t == 1 {
        res.push_str("mười ");
    } else if !res.is_empty() && o > 0 {
        res.push_str("lẻ ");
    }

    if o == 1 && t > 1 {
        res.push_str("mốt");
    } else if o == 5 && t > 0 {
        res.push_str("lăm");
    } else if o == 4 && t > 1 {
        res.push_str("tư");
    } else if o > 0 || (h == 0 && t == 0 && is_first_group_from_left) {
        res.push_str(DIGITS[o as usize]);
    }

    res.trim().to_string()
}

/// Spell out an amount of đồng in Vietnamese.
/// Example: 105 -> "Một trăm lẻ năm đồng chẵn", -50 -> "Âm năm mươi đồng chẵn"
pub fn read_money_to_text(amount: Dong) -> String {
    if amount == 0 {
        return ZERO_TEXT.to_string();
    }

    let groups = digit_groups(amount.unsigned_abs());
    let mut words: Vec<String> = Vec::with_capacity(groups.len() * 2);
    let mut found_non_zero_group = false;

    for (position, group) in groups.iter().enumerate().rev() {
        // zero groups contribute neither digits nor a scale word
        if group.is_zero() {
            continue;
        }
        words.push(read_three_digits(*group, !found_non_zero_group));
        let unit = scale_word(position);
        if !unit.is_empty() {
            words.push(unit);
        }
        found_non_zero_group = true;
    }

    let body = words.join(" ");
    let body = body.trim();
    if body.is_empty() {
        return ZERO_TEXT.to_string();
    }

    let sentence = if amount < 0 {
        format!("{}{}", NEGATIVE_PREFIX, body)
    } else {
        body.to_string()
    };
    format!("{}{}", capitalize_first(&sentence), CURRENCY_SUFFIX)
}

/// Spell out a raw computed amount. The fraction is dropped toward zero
/// before reading, so -0.5 reads "Không đồng" and -1.5 reads "Âm một đồng chẵn".
pub fn read_amount_to_text(amount: f64) -> String {
    read_money_to_text(dong_toward_zero(amount))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
