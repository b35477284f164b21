use anyhow::Result;
use cardex_ingest::{CsvParser, SchemaDetector, SchemaInference};
use chrono::NaiveDate;
use serde_json::json;
use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Replays a canned descriptor per provider, counting calls.
struct CannedInference {
    calls: Rc<Cell<usize>>,
}

impl SchemaInference for CannedInference {
    fn infer_schema(&self, file_name: &str, _sample: &str) -> Result<serde_json::Value> {
        self.calls.set(self.calls.get() + 1);
        if file_name.to_uppercase().contains("VENMO") {
            Ok(json!({
                "has_header": false,
                "skip_rows": 1,
                "date_column": "0",
                "description_column": "1",
                "amount_column": "2",
                "date_format": "%Y-%m-%dT%H:%M:%S",
                "card_provider": "VENMO",
                "spending_is_negative": true
            }))
        } else {
            Ok(json!({
                "has_header": true,
                "skip_rows": 0,
                "date_column": "Date",
                "description_column": "Description",
                "amount_column": "Amount",
                "date_format": "%m/%d/%Y",
                "card_provider": "AMEX",
                "spending_is_negative": false
            }))
        }
    }
}

fn parser_for(dir: &Path, calls: Rc<Cell<usize>>) -> CsvParser<CannedInference> {
    let detector = SchemaDetector::new(
        CannedInference { calls },
        dir.join("cache").join("schema_cache.json"),
    )
    .unwrap();
    CsvParser::new(detector)
}

#[test]
fn test_recurring_amex_exports_infer_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("AMEX_JAN.csv"),
        "Date,Description,Amount\n\
         01/14/2026,NETFLIX.COM,15.49\n\
         01/02/2026,TRADER JOE'S #553 AUSTIN TX,84.21\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("AMEX_FEB.csv"),
        "Date,Description,Amount\n\
         02/01/2026,AUTOPAY PAYMENT - THANK YOU,-450.00\n",
    )
    .unwrap();

    let calls = Rc::new(Cell::new(0));
    let mut parser = parser_for(dir.path(), calls.clone());
    let txns = parser.parse_all(dir.path()).unwrap();

    assert_eq!(txns.len(), 3);
    assert_eq!(calls.get(), 1, "both files share identity key AMEX");

    let dates: Vec<NaiveDate> = txns.iter().map(|t| t.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted, "parse_all output is date-ordered");
}

#[test]
fn test_mixed_providers_one_inference_each() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("activity_AMEX_NOV.csv"),
        "Date,Description,Amount\n11/20/2025,WAKABA SUSHI,37.30\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("VenmoStatement_December_2025.csv"),
        "Venmo personal statement\n\
         2025-12-05T09:12:00,Coffee with Sam,- $12.00\n\
         2025-12-09T20:00:00,Ticket refund,+ $24.00\n",
    )
    .unwrap();

    let calls = Rc::new(Cell::new(0));
    let mut parser = parser_for(dir.path(), calls.clone());
    let txns = parser.parse_all(dir.path()).unwrap();

    assert_eq!(calls.get(), 2, "one inference per provider family");
    assert_eq!(txns.len(), 3);

    // Venmo's native convention (spending negative) is normalized away.
    let coffee = txns.iter().find(|t| t.description.contains("Coffee")).unwrap();
    assert_eq!(coffee.amount, 12.00);
    assert_eq!(coffee.card_provider, "VENMO");
    let refund = txns.iter().find(|t| t.description.contains("refund")).unwrap();
    assert_eq!(refund.amount, -24.00);
}

#[test]
fn test_same_date_keeps_concatenation_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("AMEX_JAN.csv"),
        "Date,Description,Amount\n\
         01/10/2026,FIRST IN FILE,1.00\n\
         01/10/2026,SECOND IN FILE,2.00\n",
    )
    .unwrap();

    let calls = Rc::new(Cell::new(0));
    let mut parser = parser_for(dir.path(), calls);
    let txns = parser.parse_all(dir.path()).unwrap();

    assert_eq!(txns[0].description, "FIRST IN FILE");
    assert_eq!(txns[1].description, "SECOND IN FILE");
}

#[test]
fn test_non_csv_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("AMEX_JAN.CSV"),
        "Date,Description,Amount\n01/05/2026,COFFEE,4.50\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not a statement").unwrap();

    let calls = Rc::new(Cell::new(0));
    let mut parser = parser_for(dir.path(), calls);
    let txns = parser.parse_all(dir.path()).unwrap();

    assert_eq!(txns.len(), 1, "uppercase .CSV parsed, .txt ignored");
}
