// src/common/format.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::view::Tone;

/// Inteiro com separador de milhar pt-BR: `1234567` -> `"1.234.567"`.
pub fn format_integer_pt_br(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Uma casa decimal, com ponto (como a nota de NPS aparece na tela).
pub fn format_one_decimal(value: Decimal) -> String {
    format!("{:.1}", value)
}

/// Texto e cor do selo de variação: `+12%`, `-5%`, `0%`.
pub fn format_change(value: Decimal) -> (String, Tone) {
    let value = value.normalize();
    if value > Decimal::ZERO {
        (format!("+{}%", value), Tone::Positive)
    } else if value < Decimal::ZERO {
        (format!("{}%", value), Tone::Negative)
    } else {
        ("0%".to_string(), Tone::Neutral)
    }
}

/// Corta em `max_chars` caracteres (não bytes) e acrescenta `...`.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    match label.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &label[..byte_idx]),
        None => label.to_string(),
    }
}

pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
