mod common;

use std::str::FromStr;

use anyhow::Result;
use common::rate;
use tallyconv::domain::{
    aggregate, format_amount, parse_ledger, Amount, DurationEntry, LedgerEntry, MoneyEntry,
    ParsedLedger,
};

const SAMPLE: &str = "$10\n$5.50\n2h 30min\n1h\nnonsense";

#[test]
fn test_parse_mixed_ledger() {
    let ledger = parse_ledger(SAMPLE);

    let money: Vec<Amount> = ledger.money().map(|m| m.amount).collect();
    assert_eq!(
        money,
        vec![Amount::from_str("10").unwrap(), Amount::from_str("5.50").unwrap()]
    );

    let durations: Vec<(u64, u32)> = ledger.durations().map(|d| (d.hours, d.minutes)).collect();
    assert_eq!(durations, vec![(2, 30), (1, 0)]);

    // "nonsense" contributes nothing
    assert_eq!(ledger.len(), 4);
}

#[test]
fn test_parse_preserves_entry_order() {
    let ledger = parse_ledger(SAMPLE);
    assert_eq!(
        ledger.entries[2],
        LedgerEntry::Duration(DurationEntry {
            hours: 2,
            minutes: 30
        })
    );
    assert_eq!(
        ledger.entries[0],
        LedgerEntry::Money(MoneyEntry {
            amount: Amount::from_str("10").unwrap()
        })
    );
}

#[test]
fn test_aggregate_mixed_ledger() {
    let ledger = parse_ledger(SAMPLE);
    let summary = aggregate(&ledger, Some(&rate("1.5")));

    assert_eq!(summary.total_hours, 3);
    assert_eq!(summary.total_minutes, 30);
    assert_eq!(summary.total_source_amount, "15.50");
    assert_eq!(summary.total_target_amount.as_deref(), Some("23.25"));
}

#[test]
fn test_parse_and_aggregate_twice_is_identical() {
    let rate = rate("1.5234");
    let first = aggregate(&parse_ledger(SAMPLE), Some(&rate));
    let second = aggregate(&parse_ledger(SAMPLE), Some(&rate));
    assert_eq!(first, second);
}

#[test]
fn test_money_line_round_trip() {
    for raw in ["0", "0.01", "9.99", "10.005", "123456.78", "42.1"] {
        let amount = Amount::from_str(raw).unwrap();
        let line = format!("${}", format_amount(amount));
        let ledger = parse_ledger(&line);
        let parsed: Vec<Amount> = ledger.money().map(|m| m.amount).collect();
        assert_eq!(parsed.len(), 1, "line {line:?} should parse");
        assert_eq!(format_amount(parsed[0]), format_amount(amount));
    }
}

#[test]
fn test_empty_ledger_totals_are_zero() {
    for text in ["", "   ", "\n\n", " \t \n  "] {
        let ledger = parse_ledger(text);
        assert_eq!(ledger, ParsedLedger::default());

        let summary = aggregate(&ledger, Some(&rate("1.6")));
        assert_eq!(summary.total_hours, 0);
        assert_eq!(summary.total_minutes, 0);
        assert_eq!(summary.total_source_amount, "0.00");
        assert_eq!(summary.total_target_amount.as_deref(), Some("0.00"));
    }
}

#[test]
fn test_malformed_lines_are_dropped_not_fatal() -> Result<()> {
    let text = "$ten\n$12\nxh 5min\n3h 15min\n4h 10min extra\n  \nlunch\n$0.99";
    let ledger = parse_ledger(text);

    assert_eq!(ledger.money().count(), 2);
    assert_eq!(ledger.durations().count(), 1);

    let summary = aggregate(&ledger, None);
    assert_eq!(summary.total_source_amount, "12.99");
    assert_eq!(summary.duration_display(), "3h 15min");
    assert!(summary.is_partial());
    Ok(())
}

#[test]
fn test_read_ledger_from_file() -> Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("week.txt");
    std::fs::write(&path, "$19.99\r\n1h 45min\r\n$0.01\r\n0h 20min\r\n")?;

    let text = std::fs::read_to_string(&path)?;
    let summary = aggregate(&parse_ledger(&text), Some(&rate("2")));

    assert_eq!(summary.total_hours, 2);
    assert_eq!(summary.total_minutes, 5);
    assert_eq!(summary.total_source_amount, "20.00");
    assert_eq!(summary.total_target_amount.as_deref(), Some("40.00"));
    Ok(())
}

#[test]
fn test_oversized_money_lines_do_not_corrupt_totals() {
    let text = "$79228162514264337593543950335\n$79228162514264337593543950335\n$1_000\n$1e30\n$2.50\n1h";
    let ledger = parse_ledger(text);

    assert_eq!(ledger.money().count(), 1);
    let summary = aggregate(&ledger, Some(&rate("2")));
    assert_eq!(summary.total_source_amount, "2.50");
    assert_eq!(summary.total_target_amount.as_deref(), Some("5.00"));
    assert_eq!(summary.duration_display(), "1h 0min");
}

#[test]
fn test_converted_total_overflow_is_partial() {
    let ledger = parse_ledger("$1000000000000000\n$1000000000000000\n30min 1h\n2h 15min");
    let summary = aggregate(&ledger, Some(&rate("100000000000000000000")));

    assert_eq!(summary.total_source_amount, "2000000000000000.00");
    assert!(summary.is_partial());
    assert_eq!(summary.duration_display(), "2h 15min");
}
