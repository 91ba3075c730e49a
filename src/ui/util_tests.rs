#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn truncate_short_string_untouched() {
    assert_eq!(truncate("ofrenda", 10), "ofrenda");
}

#[test]
fn truncate_exact_length_untouched() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn truncate_long_string() {
    assert_eq!(truncate("Servicio Dominical", 9), "Servicio…");
}

#[test]
fn truncate_empty_and_zero_max() {
    assert_eq!(truncate("", 5), "");
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn truncate_accented_characters() {
    // Accented characters are multi-byte UTF-8
    assert_eq!(truncate("Música y Adoración", 7), "Música…");
}

#[test]
fn truncate_max_one() {
    assert_eq!(truncate("ab", 1), "…");
    assert_eq!(truncate("a", 1), "a");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn format_amount_no_commas() {
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

#[test]
fn format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
    assert_eq!(format_amount(dec!(5)), "$5.00");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn scroll_down_moves_page() {
    let (mut index, mut scroll) = (9, 0);
    scroll_down(&mut index, &mut scroll, 30, 10);
    assert_eq!(index, 10);
    assert_eq!(scroll, 1);
}

#[test]
fn scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (29, 20);
    scroll_down(&mut index, &mut scroll, 30, 10);
    assert_eq!(index, 29);
}

#[test]
fn scroll_up_pulls_page() {
    let (mut index, mut scroll) = (5, 5);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 4);
    assert_eq!(scroll, 4);
}

#[test]
fn scroll_up_saturates_at_zero() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}

#[test]
fn scroll_jumps() {
    let (mut index, mut scroll) = (15, 10);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 30, 10);
    assert_eq!((index, scroll), (29, 20));
}
