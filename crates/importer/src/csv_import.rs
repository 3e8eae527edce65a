use crate::error::ImportError;
use crate::report::{ImportReport, RowError, RowErrorKind};
use chrono::{DateTime, Utc};
use core_types::{Side, Trade};
use csv::{ReaderBuilder, StringRecord};
use database::TradeStore;
use std::path::Path;

/// Fields every data row must carry, in this order:
/// `symbol, side, entry_time, exit_time, entry_price, exit_price, qty, fees, notes`.
pub const FIELD_COUNT: usize = 9;

/// Imports trades from a CSV payload into `store`.
///
/// The first record is a header and is discarded. Failing to read it is the
/// only fatal error. Every other problem, including a row that is not valid
/// UTF-8, is recorded against its row in the
/// returned report and the import moves on. Rows are never deduplicated: the
/// same logical trade imported twice becomes two rows with distinct ids.
pub async fn import_csv<S, P>(store: &S, payload: P) -> Result<ImportReport, ImportError>
where
    S: TradeStore + ?Sized,
    P: AsRef<[u8]>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(payload.as_ref());

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(ImportError::MissingHeader);
    }

    let mut report = ImportReport::new();
    let mut row = 0;
    loop {
        row += 1;
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                report.record(RowError::new(row, RowErrorKind::Malformed, e.to_string()));
                continue;
            }
        }

        let trade = match parse_row(row, &record) {
            Ok(trade) => trade,
            Err(error) => {
                report.record(error);
                continue;
            }
        };

        match store.upsert(trade).await {
            Ok(_) => report.imported += 1,
            Err(e) => report.record(RowError::new(row, RowErrorKind::Storage, e.to_string())),
        }
    }

    tracing::info!(
        imported = report.imported,
        errors = report.errors.len(),
        "CSV import finished."
    );
    Ok(report)
}

/// Reads the whole file at `path` and imports it with [`import_csv`].
pub async fn import_csv_file<S>(store: &S, path: impl AsRef<Path>) -> Result<ImportReport, ImportError>
where
    S: TradeStore + ?Sized,
{
    let payload = std::fs::read(path.as_ref())?;
    import_csv(store, payload).await
}

/// Turns one data record into a trade with an empty id.
fn parse_row(row: usize, record: &StringRecord) -> Result<Trade, RowError> {
    if record.len() < FIELD_COUNT {
        return Err(RowError::new(
            row,
            RowErrorKind::InvalidRecordLength,
            format!("expected at least {FIELD_COUNT} fields, found {}", record.len()),
        ));
    }
    let field = |i: usize| record.get(i).unwrap_or_default();

    let entry_time = parse_time(field(2))
        .map_err(|e| RowError::new(row, RowErrorKind::BadEntryTime, e.to_string()))?;
    let exit_time = match field(3) {
        "" => None,
        raw => Some(
            parse_time(raw)
                .map_err(|e| RowError::new(row, RowErrorKind::BadExitTime, e.to_string()))?,
        ),
    };

    let exit_price = match field(5) {
        "" => None,
        raw => Some(parse_number_or_zero(row, "exit_price", raw)),
    };

    Ok(Trade {
        id: String::new(),
        symbol: field(0).to_string(),
        side: Side::parse_lenient(field(1)),
        entry_time,
        exit_time,
        entry_price: parse_number_or_zero(row, "entry_price", field(4)),
        exit_price,
        quantity: parse_number_or_zero(row, "qty", field(6)),
        fees: parse_number_or_zero(row, "fees", field(7)),
        notes: field(8).to_string(),
        created_at: None,
        updated_at: None,
    })
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|t| t.with_timezone(&Utc))
}

// Unparseable numbers are imported as zero and never reported as row errors.
fn parse_number_or_zero(row: usize, name: &str, raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(row, field = name, value = raw, "Unparseable number imported as zero.");
            0.0
        }
    }
}
