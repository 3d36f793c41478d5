use anyhow::Result;
use std::io::Write;

use crate::domain::Summary;

/// Shown in place of a target total that could not be computed
pub const UNAVAILABLE: &str = "unavailable";

/// Labels for the two money columns of a summary.
#[derive(Debug, Clone)]
pub struct CurrencyPair {
    pub source: String,
    pub target: String,
}

/// Exporter for rendering a ledger summary in the supported formats
pub struct SummaryExporter<'a> {
    summary: &'a Summary,
    currencies: CurrencyPair,
}

impl<'a> SummaryExporter<'a> {
    pub fn new(summary: &'a Summary, currencies: CurrencyPair) -> Self {
        Self {
            summary,
            currencies,
        }
    }

    /// Render as `table`, `json` or `csv`; anything unknown falls back to table.
    pub fn export<W: Write>(&self, format: &str, writer: W) -> Result<()> {
        match format {
            "json" => self.export_json(writer),
            "csv" => self.export_csv(writer),
            _ => self.export_table(writer),
        }
    }

    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self.summary)?;
        writeln!(writer)?;
        Ok(())
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "total_hours",
            "total_minutes",
            "source_currency",
            "total_source_amount",
            "target_currency",
            "total_target_amount",
        ])?;

        let hours = self.summary.total_hours.to_string();
        let minutes = self.summary.total_minutes.to_string();
        csv_writer.write_record([
            hours.as_str(),
            minutes.as_str(),
            self.currencies.source.as_str(),
            self.summary.total_source_amount.as_str(),
            self.currencies.target.as_str(),
            self.summary.total_target_amount.as_deref().unwrap_or_default(),
        ])?;

        csv_writer.flush()?;
        Ok(())
    }

    pub fn export_table<W: Write>(&self, mut writer: W) -> Result<()> {
        let target = self
            .summary
            .total_target_amount
            .as_deref()
            .map(|amount| format!("${amount}"))
            .unwrap_or_else(|| UNAVAILABLE.to_string());

        writeln!(writer, "Ledger Summary")?;
        writeln!(writer, "{}", "-".repeat(32))?;
        writeln!(writer, "{:<16}{:>16}", "Time:", self.summary.duration_display())?;
        writeln!(
            writer,
            "{:<16}{:>16}",
            format!("{}:", self.currencies.source),
            format!("${}", self.summary.total_source_amount)
        )?;
        writeln!(
            writer,
            "{:<16}{:>16}",
            format!("{}:", self.currencies.target),
            target
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> CurrencyPair {
        CurrencyPair {
            source: "USD".into(),
            target: "AUD".into(),
        }
    }

    fn summary(target: Option<&str>) -> Summary {
        Summary {
            total_hours: 3,
            total_minutes: 30,
            total_source_amount: "15.50".into(),
            total_target_amount: target.map(String::from),
        }
    }

    fn render(summary: &Summary, format: &str) -> String {
        let mut out = Vec::new();
        SummaryExporter::new(summary, pair())
            .export(format, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_export_csv() {
        let out = render(&summary(Some("23.25")), "csv");
        assert_eq!(
            out,
            "total_hours,total_minutes,source_currency,total_source_amount,target_currency,total_target_amount\n\
             3,30,USD,15.50,AUD,23.25\n"
        );
    }

    #[test]
    fn test_export_csv_partial_leaves_target_blank() {
        let out = render(&summary(None), "csv");
        assert!(out.ends_with("3,30,USD,15.50,AUD,\n"));
    }

    #[test]
    fn test_export_json_partial_is_null() {
        let out = render(&summary(None), "json");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total_hours"], 3);
        assert_eq!(value["total_source_amount"], "15.50");
        assert!(value["total_target_amount"].is_null());
    }

    #[test]
    fn test_export_table() {
        let out = render(&summary(Some("23.25")), "table");
        assert!(out.contains("3h 30min"));
        assert!(out.contains("$15.50"));
        assert!(out.contains("$23.25"));

        let partial = render(&summary(None), "anything");
        assert!(partial.contains(UNAVAILABLE));
    }
}
