/// Money is represented as whole đồng. Fractions never reach the ledger of a
/// settlement sheet: they are dropped (floored) at the display boundary.
pub type Dong = i64;

/// Format an optional number as a Vietnamese display string.
/// The value is floored, then grouped with `.` every three digits.
/// Example: Some(1234567.9) -> "1.234.567", Some(-1234.5) -> "-1.235", None -> ""
pub fn format_vnd(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value.is_finite() => {
            let floored = value.floor();
            // normalise -0.0 so it prints as "0"
            let floored = if floored == 0.0 { 0.0 } else { floored };
            group_digits(&format!("{:.0}", floored))
        }
        _ => String::new(),
    }
}

/// Format whole đồng without going through floating point.
/// Example: 1000 -> "1.000", -50000 -> "-50.000"
pub fn format_dong(amount: Dong) -> String {
    group_digits(&amount.to_string())
}

/// Format a measurement (length, width, size, quantity) keeping up to two
/// decimals after a `,`.
/// Example: 2.5 -> "2,5", 1200.75 -> "1.200,75", 3.0 -> "3"
pub fn format_measure(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let scaled = (value.abs() * 100.0).round() as u64;
    let units = scaled / 100;
    let hundredths = scaled % 100;
    let sign = if value < 0.0 && scaled != 0 { "-" } else { "" };

    let mut out = format!("{}{}", sign, group_digits(&units.to_string()));
    if hundredths > 0 {
        let decimals = format!("{:02}", hundredths);
        out.push(',');
        out.push_str(decimals.trim_end_matches('0'));
    }
    out
}

/// Parse a Vietnamese display string into a number. Never fails.
/// `.` separators are dropped, `,` becomes the decimal point, and the longest
/// numeric prefix is read. Anything unreadable is 0.
/// Example: "1.234.567" -> 1234567.0, "2,5" -> 2.5, "abc" -> 0.0
pub fn parse_vnd(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let cleaned = normalize_separators(text);
    NumericPrefix::scan(&cleaned)
        .and_then(|prefix| prefix.to_f64())
        .filter(|value| !value.is_nan())
        .unwrap_or(0.0)
}

/// Parse a Vietnamese display string into whole đồng. Never fails.
/// Integers are read exactly across the full `i64` range; a fractional part
/// is floored like `format_vnd` does, and out-of-range values saturate.
/// Example: "9.223.372.036.854.775.807" -> i64::MAX, "-1,5" -> -2
pub fn parse_dong(text: &str) -> Dong {
    if text.is_empty() {
        return 0;
    }
    let cleaned = normalize_separators(text);
    let Some(prefix) = NumericPrefix::scan(&cleaned) else {
        return 0;
    };
    prefix
        .to_exact_dong()
        .unwrap_or_else(|| prefix.to_f64().map(dong_from_f64).unwrap_or(0))
}

/// Convert a computed amount to whole đồng: floored, saturating, NaN is 0.
pub fn dong_from_f64(value: f64) -> Dong {
    if value.is_nan() {
        0
    } else {
        // `as` saturates at the i64 bounds
        value.floor() as Dong
    }
}

/// Whole đồng of a raw amount with the fraction dropped toward zero, as
/// the amount in words reads it. Saturating, NaN is 0.
/// Example: -1.5 -> -1, -0.5 -> 0
pub fn dong_toward_zero(value: f64) -> Dong {
    if value.is_nan() {
        0
    } else {
        value.trunc() as Dong
    }
}

/// Keystroke filter for editable money fields: only digits, `.` and `,`,
/// with at most one `,`.
pub fn accepts_numeric_input(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && text.matches(',').count() <= 1
}

/// Insert `.` between groups of three digits counted from the right.
/// A leading `-` stays in front of the first group.
fn group_digits(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let len = digits.len();
    let mut out = String::with_capacity(sign.len() + len + len / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        out.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            out.push('.');
        }
    }
    out
}

fn normalize_separators(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// The longest leading decimal literal of a string, split into its parts.
/// Follows the usual float prefix rules: leading whitespace, optional sign,
/// digits with at most one decimal point, optional exponent, rest ignored.
struct NumericPrefix<'a> {
    negative: bool,
    infinite: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: &'a str,
}

impl<'a> NumericPrefix<'a> {
    fn scan(text: &'a str) -> Option<Self> {
        let text = text.trim_start();
        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        if rest.starts_with("Infinity") {
            return Some(Self {
                negative,
                infinite: true,
                integer: "",
                fraction: "",
                exponent: "",
            });
        }

        let bytes = rest.as_bytes();
        let int_len = count_digits(rest);
        let mut end = int_len;
        let mut fraction = "";
        if bytes.get(end) == Some(&b'.') {
            let frac_len = count_digits(&rest[end + 1..]);
            fraction = &rest[end + 1..end + 1 + frac_len];
            end += 1 + frac_len;
        }
        if int_len == 0 && fraction.is_empty() {
            return None;
        }

        let mut exponent = "";
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let after = &rest[end + 1..];
            let sign_len = usize::from(after.starts_with(['+', '-']));
            let exp_digits = count_digits(&after[sign_len..]);
            if exp_digits > 0 {
                exponent = &rest[end..end + 1 + sign_len + exp_digits];
            }
        }

        Some(Self {
            negative,
            infinite: false,
            integer: &rest[..int_len],
            fraction,
            exponent,
        })
    }

    fn to_f64(&self) -> Option<f64> {
        if self.infinite {
            return Some(if self.negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        let literal = format!(
            "{}{}.{}{}",
            if self.negative { "-" } else { "" },
            or_zero(self.integer),
            or_zero(self.fraction),
            self.exponent
        );
        literal.parse().ok()
    }

    /// Exact integer reading; `None` when the value needs the float path
    /// (exponent, infinity, no integer digits or i64 overflow).
    fn to_exact_dong(&self) -> Option<Dong> {
        if self.infinite || self.integer.is_empty() || !self.exponent.is_empty() {
            return None;
        }
        let magnitude: i128 = self.integer.parse().ok()?;
        let has_fraction = self.fraction.bytes().any(|b| b != b'0');
        let value = match (self.negative, has_fraction) {
            (true, true) => -magnitude - 1,
            (true, false) => -magnitude,
            (false, _) => magnitude,
        };
        Dong::try_from(value).ok()
    }
}

fn count_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

fn or_zero(digits: &str) -> &str {
    if digits.is_empty() { "0" } else { digits }
}
