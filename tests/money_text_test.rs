use quyettoan::domain::{
    format_dong, format_vnd, parse_dong, parse_vnd, read_amount_to_text, read_money_to_text,
    NumberField,
};

/// Deterministic spread of amounts below 10^15 (no rand dependency needed).
fn sample_amounts() -> Vec<i64> {
    let mut amounts = vec![0, 1, 9, 10, 99, 100, 999, 1_000, 1_001, 10_000, 100_000];
    let mut x: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..500 {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        amounts.push((x % 1_000_000_000_000_000) as i64);
    }
    amounts
}

#[test]
fn test_round_trip_below_10_pow_15() {
    for amount in sample_amounts() {
        let text = format_vnd(Some(amount as f64));
        assert_eq!(parse_vnd(&text), amount as f64, "{} -> {}", amount, text);
        assert_eq!(parse_dong(&format_dong(amount)), amount);
    }
}

#[test]
fn test_zero_and_missing_values() {
    assert_eq!(read_money_to_text(0), "Không đồng");
    assert_eq!(format_vnd(Some(0.0)), "0");
    assert_eq!(format_vnd(None), "");
    assert_eq!(format_vnd(Some(f64::NAN)), "");
}

#[test]
fn test_grouping() {
    assert_eq!(format_vnd(Some(1000.0)), "1.000");
    assert_eq!(format_vnd(Some(1234567.0)), "1.234.567");
    assert_eq!(format_dong(1234567), "1.234.567");
}

#[test]
fn test_parsing() {
    assert_eq!(parse_vnd("1.234.567"), 1234567.0);
    assert_eq!(parse_vnd(""), 0.0);
    assert_eq!(parse_vnd("abc"), 0.0);
}

#[test]
fn test_literal_readings() {
    assert_eq!(read_money_to_text(1_000_000), "Một triệu đồng chẵn");
    assert_eq!(read_money_to_text(105), "Một trăm lẻ năm đồng chẵn");
    assert_eq!(read_money_to_text(21), "Hai mươi mốt đồng chẵn");
    assert_eq!(read_money_to_text(25), "Hai mươi lăm đồng chẵn");
    assert_eq!(read_money_to_text(-50), "Âm năm mươi đồng chẵn");
}

#[test]
fn test_typed_fractions_are_dropped_toward_zero() {
    assert_eq!(read_amount_to_text(parse_vnd("-0,5")), "Không đồng");
    assert_eq!(read_amount_to_text(parse_vnd("-1,5")), "Âm một đồng chẵn");
    assert_eq!(read_amount_to_text(parse_vnd("1,9")), "Một đồng chẵn");
    assert_eq!(
        read_amount_to_text(parse_vnd("1.250.000,75")),
        "Một triệu hai trăm năm mươi nghìn đồng chẵn"
    );
}

#[test]
fn test_typical_invoice_amounts() {
    assert_eq!(
        read_money_to_text(5_610_000),
        "Năm triệu sáu trăm mười nghìn đồng chẵn"
    );
    assert_eq!(
        read_money_to_text(12_345_678),
        "Mười hai triệu ba trăm bốn mươi lăm nghìn sáu trăm bảy mươi tám đồng chẵn"
    );
    assert_eq!(
        read_money_to_text(2_001_500_000),
        "Hai tỷ không trăm lẻ một triệu năm trăm nghìn đồng chẵn"
    );
}

#[test]
fn test_leading_group_never_says_zero_hundred() {
    for top in 1..100i64 {
        for scale in [1i64, 1_000, 1_000_000, 1_000_000_000] {
            let text = read_money_to_text(top * scale);
            assert!(!text.contains("không trăm"), "{}: {}", top * scale, text);
            assert!(!text.contains("trăm"), "{}: {}", top * scale, text);
        }
    }
}

#[test]
fn test_only_first_letter_is_capitalized() {
    for amount in sample_amounts().into_iter().filter(|a| *a != 0) {
        for signed in [amount, -amount] {
            let text = read_money_to_text(signed);
            let mut chars = text.chars();
            assert!(chars.next().unwrap().is_uppercase(), "{}", text);
            assert!(chars.all(|c| !c.is_uppercase()), "{}", text);
            assert!(text.ends_with(" đồng chẵn"), "{}", text);
            assert_eq!(text.starts_with("Âm "), signed < 0, "{}", text);
        }
    }
}

#[test]
fn test_blur_keeps_value() {
    for amount in sample_amounts() {
        let mut field = NumberField::new(amount as f64);
        let before = field.value();
        field.on_blur();
        field.on_blur();
        assert_eq!(field.value(), before);
        assert_eq!(field.display(), format_vnd(Some(before)));
    }
}
