use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Draw, PICK_COUNT, validate_numbers};

/// date + 5 boules + numéro complémentaire
const MIN_FIELDS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    TooFewFields(usize),
    InvalidNumber { field: usize, value: String },
    InvalidBonus(String),
    InvalidDraw(String),
    Unreadable(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::TooFewFields(n) => {
                write!(f, "{} champ(s) au lieu de {} minimum", n, MIN_FIELDS)
            }
            RejectReason::InvalidNumber { field, value } => {
                write!(f, "numéro illisible '{}' (champ {})", value, field)
            }
            RejectReason::InvalidBonus(value) => write!(f, "numéro chance illisible '{}'", value),
            RejectReason::InvalidDraw(msg) => write!(f, "{}", msg),
            RejectReason::Unreadable(msg) => write!(f, "ligne illisible : {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub draws: Vec<Draw>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportReport {
    pub fn accepted(&self) -> usize {
        self.draws.len()
    }

    pub fn total_rows(&self) -> usize {
        self.draws.len() + self.rejected.len()
    }
}

fn parse_record(record: &csv::StringRecord) -> Result<Draw, RejectReason> {
    if record.len() < MIN_FIELDS {
        return Err(RejectReason::TooFewFields(record.len()));
    }

    let mut numbers = [0u8; PICK_COUNT];
    for (i, slot) in numbers.iter_mut().enumerate() {
        let raw = &record[i + 1];
        *slot = raw.parse::<u8>().map_err(|_| RejectReason::InvalidNumber {
            field: i + 1,
            value: raw.to_string(),
        })?;
    }

    let raw_bonus = &record[MIN_FIELDS - 1];
    let bonus = raw_bonus
        .parse::<u8>()
        .map_err(|_| RejectReason::InvalidBonus(raw_bonus.to_string()))?;

    validate_numbers(&numbers).map_err(|e| RejectReason::InvalidDraw(e.to_string()))?;

    Ok(Draw::new(&record[0], numbers, bonus))
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

fn collect_records<R: Read>(mut reader: csv::Reader<R>) -> ImportReport {
    let mut report = ImportReport::default();

    for record_result in reader.records() {
        match record_result {
            Ok(record) => {
                // Lignes faites uniquement d'espaces
                if record.iter().all(|field| field.is_empty()) {
                    continue;
                }
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                match parse_record(&record) {
                    Ok(draw) => report.draws.push(draw),
                    Err(reason) => {
                        log::warn!("Ligne {} ignorée : {}", line, reason);
                        report.rejected.push(RejectedRow { line, reason });
                    }
                }
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                log::warn!("Ligne {} illisible : {}", line, e);
                report.rejected.push(RejectedRow {
                    line,
                    reason: RejectReason::Unreadable(e.to_string()),
                });
            }
        }
    }

    log::info!(
        "{} tirages acceptés, {} lignes rejetées",
        report.accepted(),
        report.rejected.len()
    );
    report
}

/// Parse un historique CSV : une ligne d'en-tête puis `date,n1,n2,n3,n4,n5,chance[,...]`.
pub fn parse_draws(text: &str) -> ImportReport {
    collect_records(reader_builder().from_reader(text.as_bytes()))
}

pub fn load_csv(path: &Path) -> Result<ImportReport> {
    let reader = reader_builder()
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    Ok(collect_records(reader))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "date,b1,b2,b3,b4,b5,chance
2020-01-01,1,2,3,4,5,10
2020-01-02,10,20,30,40,49,1
2020-01-03,7,8,9,10,11,2
";

    #[test]
    fn test_parse_sample() {
        let report = parse_draws(SAMPLE);
        assert_eq!(report.accepted(), 3);
        assert!(report.rejected.is_empty());
        assert_eq!(report.draws[0].date, "2020-01-01");
        assert_eq!(report.draws[1].numbers, [10, 20, 30, 40, 49]);
        assert_eq!(report.draws[2].bonus, 2);
    }

    #[test]
    fn test_numbers_sorted_on_parse() {
        let report = parse_draws("date,b1,b2,b3,b4,b5,c\n2021-05-01,44,3,19,8,27,6\n");
        assert_eq!(report.draws[0].numbers, [3, 8, 19, 27, 44]);
    }

    #[test]
    fn test_header_only() {
        let report = parse_draws("date,b1,b2,b3,b4,b5,chance\n");
        assert_eq!(report.total_rows(), 0);
    }

    #[test]
    fn test_extra_fields_ignored() {
        let report = parse_draws("h\n2020-01-01,1,2,3,4,5,6,gagnants,123456\n");
        assert_eq!(report.accepted(), 1);
        assert_eq!(report.draws[0].bonus, 6);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let report = parse_draws("h\n2020-01-01,1,2,3,4,5,6\n\n   \n2020-01-04,6,7,8,9,10,1\n");
        assert_eq!(report.accepted(), 2);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_whitespace_trimmed() {
        let report = parse_draws("h\n 2020-01-01 , 1 , 2 ,3, 4,5 , 6 \n");
        assert_eq!(report.accepted(), 1);
        assert_eq!(report.draws[0].date, "2020-01-01");
    }

    #[test]
    fn test_too_few_fields_rejected() {
        let report = parse_draws("h\n2020-01-01,1,2,3,4,5,6\n2020-01-02,1,2,3\n");
        assert_eq!(report.accepted(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 3);
        assert_eq!(report.rejected[0].reason, RejectReason::TooFewFields(4));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let report = parse_draws("h\n2020-01-01,1,x,3,4,5,6\n2020-01-02,1,2,3,4,5,?\n");
        assert_eq!(report.accepted(), 0);
        assert_eq!(
            report.rejected[0].reason,
            RejectReason::InvalidNumber { field: 2, value: "x".to_string() }
        );
        assert_eq!(report.rejected[1].reason, RejectReason::InvalidBonus("?".to_string()));
    }

    #[test]
    fn test_invalid_draw_rejected() {
        let report = parse_draws("h\n2020-01-01,1,2,3,4,50,6\n2020-01-02,1,1,3,4,5,6\n");
        assert_eq!(report.accepted(), 0);
        assert_eq!(report.rejected.len(), 2);
        assert!(matches!(report.rejected[0].reason, RejectReason::InvalidDraw(_)));
        assert!(matches!(report.rejected[1].reason, RejectReason::InvalidDraw(_)));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_csv(Path::new("/nonexistent/leloto.csv")).is_err());
    }
}
