use contracts::usecases::u601_inventory_csv_upload::{CsvRow, DroppedLine};

/// Результат разбора файла остатков
#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub rows: Vec<CsvRow>,
    pub dropped: Vec<DroppedLine>,
}

/// Разобрать CSV `uuid,expirationDate,stock`.
///
/// Первая строка (заголовок) отбрасывается всегда. Кавычки не поддерживаются:
/// каждая строка режется по запятой. Строка без одного из трёх полей
/// пропускается с предупреждением в лог. Нечисловой `stock` не отбрасывает
/// строку: она остаётся с `stock = None` и не пройдёт проверку в таблице.
pub fn parse_inventory_csv(text: &str) -> ParsedCsv {
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');

    // Заголовок = первая физическая строка, даже пустая.
    // csv::Reader с has_headers(true) пропустил бы пустые строки до заголовка.
    let body = text.split_once('\n').map(|(_, rest)| rest).unwrap_or("");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());

    let mut parsed = ParsedCsv::default();
    let mut record = csv::StringRecord::new();

    loop {
        let line_number = file_line(reader.position());
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::warn!("Skipping unreadable CSV line {}: {}", line_number, e);
                parsed.dropped.push(DroppedLine {
                    line_number,
                    content: String::new(),
                    reason: e.to_string(),
                });
                continue;
            }
        }

        let line_number = record.position().map(file_line).unwrap_or(line_number);

        let field = |i: usize| record.get(i).map(str::trim).filter(|v| !v.is_empty());

        match (field(0), field(1), field(2)) {
            (Some(uuid), Some(expiration_date), Some(stock)) => parsed.rows.push(CsvRow {
                uuid: uuid.to_string(),
                expiration_date: expiration_date.to_string(),
                stock: parse_int_prefix(stock),
            }),
            _ => {
                let content = record.iter().collect::<Vec<_>>().join(",");
                tracing::warn!(
                    "Skipping CSV line {}: expected uuid,expirationDate,stock, got '{}'",
                    line_number,
                    content
                );
                parsed.dropped.push(DroppedLine {
                    line_number,
                    content,
                    reason: "missing field".to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Parsed inventory CSV: {} rows, {} dropped",
        parsed.rows.len(),
        parsed.dropped.len()
    );

    parsed
}

/// Номер строки в файле (1 = заголовок) по позиции в теле без заголовка
fn file_line(position: &csv::Position) -> usize {
    position.line() as usize + 1
}

/// Целое с начала строки, как `parseInt(s, 10)`: пробелы, знак, цифры.
/// `"10abc"` -> 10, `"abc"` -> None
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_file() {
        let parsed =
            parse_inventory_csv("header\nabc-123,2025-01-01,10\nbad-row\nxyz-456,2025-02-02,0");

        let ids: Vec<_> = parsed.rows.iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(ids, vec!["abc-123", "xyz-456"]);
        assert_eq!(parsed.rows[0].expiration_date, "2025-01-01");
        assert_eq!(parsed.rows[0].stock, Some(10));
        assert_eq!(parsed.rows[1].stock, Some(0));

        assert_eq!(parsed.dropped.len(), 1);
        assert_eq!(parsed.dropped[0].content, "bad-row");
        assert_eq!(parsed.dropped[0].line_number, 3);
    }

    #[test]
    fn test_rows_with_missing_fields_are_dropped() {
        let text = "uuid,expirationDate,stock\n\
                    a,2025-01-01,1\n\
                    b,,2\n\
                    ,2025-01-01,3\n\
                    c,2025-01-01\n\
                    d,2025-01-01,\n\
                    e,2025-01-01,5,extra\n";
        let parsed = parse_inventory_csv(text);

        let ids: Vec<_> = parsed.rows.iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        assert_eq!(parsed.dropped.len(), 4);
        // не больше строк, чем строк данных
        assert!(parsed.rows.len() + parsed.dropped.len() <= 6);
    }

    #[test]
    fn test_non_numeric_stock_is_kept_as_none() {
        let parsed = parse_inventory_csv("h\na,2025-01-01,muchos\nb,2025-01-01,12abc\n");
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].stock, None);
        assert_eq!(parsed.rows[1].stock, Some(12));
    }

    #[test]
    fn test_header_only_blank_lines_crlf_and_bom() {
        assert!(parse_inventory_csv("").rows.is_empty());
        assert!(parse_inventory_csv("uuid,expirationDate,stock").rows.is_empty());

        let parsed = parse_inventory_csv("\u{FEFF}h\r\na,2025-01-01,7\r\n\r\nb,2025-03-01,8\r\n");
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].stock, Some(7));
        assert_eq!(parsed.rows[1].expiration_date, "2025-03-01");
        assert!(parsed.dropped.is_empty());
    }

    #[test]
    fn test_empty_first_line_is_the_header() {
        let parsed = parse_inventory_csv("\nabc-123,2025-01-01,10\nxyz-456,2025-02-02,5");

        let ids: Vec<_> = parsed.rows.iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(ids, vec!["abc-123", "xyz-456"]);
        assert!(parsed.dropped.is_empty());
    }

    #[test]
    fn test_line_numbers_count_the_header() {
        let parsed = parse_inventory_csv("\na,2025-01-01,1\nbroken\n");
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.dropped.len(), 1);
        assert_eq!(parsed.dropped[0].line_number, 3);
    }

    #[test]
    fn test_quotes_are_not_special() {
        let parsed = parse_inventory_csv("h\n\"a\",2025-01-01,1\n");
        assert_eq!(parsed.rows[0].uuid, "\"a\"");
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("10"), Some(10));
        assert_eq!(parse_int_prefix("  42"), Some(42));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+3"), Some(3));
        assert_eq!(parse_int_prefix("7.9"), Some(7));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(""), None);
    }
}
