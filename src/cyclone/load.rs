use std::fs;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use super::record::{CycloneRecord, FormationDate};

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    id: String,
    name: String,
    formation_date: String,
    max_wind_speed: f32,
    min_pressure: f32,
    #[serde(default)]
    year: Option<i32>,
}

pub fn load_records_file(path: &str, current_year: i32) -> Result<Vec<CycloneRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read records file {path}"))?;
    parse_records(&raw, current_year).with_context(|| format!("invalid records file {path}"))
}

fn parse_records(raw: &str, current_year: i32) -> Result<Vec<CycloneRecord>> {
    let rows: Vec<RawRecord> = serde_json::from_str(raw).context("invalid records JSON")?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let record = convert_record(row, current_year)
            .with_context(|| format!("rejected record at index {index}"))?;
        records.push(record);
    }
    Ok(records)
}

fn convert_record(raw: RawRecord, current_year: i32) -> Result<CycloneRecord> {
    let formation_date = parse_formation_date(&raw.formation_date)?;

    if let Some(year) = raw.year
        && year != formation_date.year
    {
        return Err(anyhow!(
            "record {} declares year {year} but formed on {formation_date}",
            raw.id
        ));
    }

    let record = CycloneRecord::new(
        raw.id,
        raw.name,
        formation_date,
        raw.max_wind_speed,
        raw.min_pressure,
        current_year,
    );
    record.validate()?;
    Ok(record)
}

fn parse_formation_date(value: &str) -> Result<FormationDate> {
    let mut parts = value.splitn(3, '-');
    let year = parts
        .next()
        .and_then(|part| part.parse::<i32>().ok())
        .ok_or_else(|| anyhow!("formation date {value:?} has no year"))?;
    let month = parts
        .next()
        .and_then(|part| part.parse::<u8>().ok())
        .ok_or_else(|| anyhow!("formation date {value:?} has no month"))?;
    let day = parts
        .next()
        .and_then(|part| part.parse::<u8>().ok())
        .ok_or_else(|| anyhow!("formation date {value:?} has no day"))?;

    Ok(FormationDate { year, month, day })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"[
        {
            "id": "201809",
            "name": "Mangkhut",
            "formation_date": "2018-09-07",
            "max_wind_speed": 250.0,
            "min_pressure": 905.0,
            "year": 2018
        }
    ]"#;

    #[test]
    fn parses_a_valid_record() {
        let records = parse_records(VALID, 2026).expect("valid records");
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "Mangkhut");
        assert_eq!(record.year, 2018);
        assert_eq!(record.formation_date.to_string(), "2018-09-07");
        assert_eq!(record.category.label(), "Super Typhoon");
        assert!(!record.is_prediction);
    }

    #[test]
    fn year_field_is_optional_but_must_agree() {
        let missing_year = VALID.replace("\"year\": 2018\n", "\"year\": null\n");
        assert!(parse_records(&missing_year, 2026).is_ok());

        let wrong_year = VALID.replace("\"year\": 2018", "\"year\": 2019");
        assert!(parse_records(&wrong_year, 2026).is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        let extra = VALID.replace("\"year\": 2018", "\"year\": 2018, \"basin\": \"WP\"");
        assert!(parse_records(&extra, 2026).is_err());
    }

    #[test]
    fn rejects_malformed_dates_and_winds() {
        let bad_date = VALID.replace("2018-09-07", "September 7");
        assert!(parse_records(&bad_date, 2026).is_err());

        let bad_month = VALID.replace("2018-09-07", "2018-13-07");
        assert!(parse_records(&bad_month, 2026).is_err());

        let bad_wind = VALID.replace("250.0", "-12.0");
        assert!(parse_records(&bad_wind, 2026).is_err());
    }

    #[test]
    fn empty_array_is_not_an_error() {
        assert!(parse_records("[]", 2026).expect("empty ok").is_empty());
    }
}
