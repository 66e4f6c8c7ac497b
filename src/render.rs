//! CSV and JSON rendering of a [`Report`].

use serde_json::Value;

use crate::error::{BuylistError, Result};
use crate::models::{Report, ReportRow};

/// CSV column layout, one column per [`ReportRow`] field.
pub const CSV_HEADER: [&str; 8] = [
    "set",
    "number",
    "name",
    "uuid",
    "scryfallId",
    "finish",
    "price",
    "price_date",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// `json` (any case) selects JSON; anything else, or nothing, is CSV.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(f) if f.trim().eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv; charset=utf-8",
            OutputFormat::Json => "application/json",
        }
    }
}

/// Render a report body in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => to_csv(report),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
    }
}

/// Header plus one line per row, `\n`-terminated. Fields containing a comma,
/// quote or line break are quoted with inner quotes doubled.
pub fn to_csv(report: &Report) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for row in &report.data {
        writer.write_record(csv_fields(row)).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| BuylistError::Unexpected(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| BuylistError::Unexpected(e.to_string()))
}

fn csv_fields(row: &ReportRow) -> [String; 8] {
    [
        row.set.clone(),
        row.number.clone(),
        row.name.clone(),
        row.uuid.clone(),
        row.scryfall_id.clone(),
        row.finish.clone(),
        price_field(&row.price),
        row.price_date.clone(),
    ]
}

/// Text of a price cell. `null` is empty, strings pass through, and whole
/// numbers drop their fraction (`10.0` renders as `10`).
fn price_field(price: &Value) -> String {
    match price {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn csv_error(e: csv::Error) -> BuylistError {
    BuylistError::Unexpected(format!("CSV write failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(name: &str, price: Value) -> ReportRow {
        ReportRow {
            set: "MH3".into(),
            number: "1".into(),
            name: name.into(),
            uuid: "u1".into(),
            scryfall_id: String::new(),
            finish: "normal".into(),
            price,
            price_date: "2024-06-02".into(),
        }
    }

    #[test]
    fn format_parse_falls_back_to_csv() {
        assert_eq!(OutputFormat::parse(None), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse(Some("csv")), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse(Some("xml")), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse(Some("JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::parse(Some("json")), OutputFormat::Json);
    }

    #[test]
    fn csv_header_then_rows() {
        let report = Report::new("MH3", vec![row("Flare of Denial", json!(12.5))]);
        let csv = to_csv(&report).unwrap();
        assert_eq!(
            csv,
            "set,number,name,uuid,scryfallId,finish,price,price_date\n\
             MH3,1,Flare of Denial,u1,,normal,12.5,2024-06-02\n"
        );
    }

    #[test]
    fn csv_quotes_special_characters() {
        let report = Report::new(
            "MH3",
            vec![
                row("Fire, Ice", json!(1.0)),
                row("The \"Big\" One", json!(2.0)),
                row("Line\nBreak", Value::Null),
            ],
        );
        let csv = to_csv(&report).unwrap();
        let lines: Vec<&str> = csv.splitn(4, '\n').collect();
        assert_eq!(lines[1], "MH3,1,\"Fire, Ice\",u1,,normal,1,2024-06-02");
        assert_eq!(lines[2], "MH3,1,\"The \"\"Big\"\" One\",u1,,normal,2,2024-06-02");
        assert_eq!(lines[3], "MH3,1,\"Line\nBreak\",u1,,normal,,2024-06-02\n");
    }

    #[test]
    fn empty_report_is_header_only() {
        let csv = to_csv(&Report::new("MH3", Vec::new())).unwrap();
        assert_eq!(csv, "set,number,name,uuid,scryfallId,finish,price,price_date\n");
    }

    #[test]
    fn json_shape() {
        let report = Report::new("MH3", vec![row("Flare of Denial", json!(12.5))]);
        let body = render(&report, OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["set"], "MH3");
        assert_eq!(v["count"], 1);
        assert_eq!(v["data"][0]["scryfallId"], "");
        assert_eq!(v["data"][0]["price"], 12.5);
        assert_eq!(v["data"][0]["price_date"], "2024-06-02");
    }

    #[test]
    fn price_cells_follow_the_snapshot_value() {
        assert_eq!(price_field(&Value::Null), "");
        assert_eq!(price_field(&json!(12.5)), "12.5");
        assert_eq!(price_field(&json!(10.0)), "10");
        assert_eq!(price_field(&json!(3)), "3");
        assert_eq!(price_field(&json!("1.5")), "1.5");
        assert_eq!(price_field(&json!(true)), "true");
    }
}
