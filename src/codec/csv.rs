//! CSV encoding and decoding of timesheet entries
//!
//! The export layout is fixed:
//!
//! ```text
//! date,project,hours,note
//! "2024-01-05","Acme",3.5,"kickoff"
//! ```
//!
//! Every text field is quoted (embedded quotes doubled) and `hours` is a bare
//! number. Decoding is tolerant of what spreadsheets produce: columns are
//! found by header name in any order (the header goes through the same
//! quote-aware splitter as the rows), quoted fields may contain commas, blank
//! lines are skipped, and rows that don't make a valid entry are dropped
//! instead of failing the whole document.

use ::csv::StringRecord;
use tracing::debug;

use crate::models::TimesheetEntry;

/// Column names, in export order
pub const CSV_HEADERS: [&str; 4] = ["date", "project", "hours", "note"];

/// Encode entries as a CSV document, in the order given
///
/// Rows are joined with `\n` and the document has no trailing newline.
pub fn to_csv(entries: &[TimesheetEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for entry in entries {
        lines.push(format!(
            "{},{},{},{}",
            quote_field(&entry.date),
            quote_field(&entry.project),
            entry.hours,
            quote_field(&entry.note)
        ));
    }

    lines.join("\n")
}

/// Decode a CSV document into entries
///
/// Never fails: malformed rows are dropped and missing columns read as empty
/// (or `0` for hours). Each accepted row becomes an entry with a fresh id.
pub fn from_csv(text: &str) -> Vec<TimesheetEntry> {
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns = ColumnIndex::from_header(&split_csv_line(header));

    let mut entries = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        match columns.decode_row(&split_csv_line(line)) {
            Some(entry) => entries.push(entry),
            None => dropped += 1,
        }
    }

    debug!(accepted = entries.len(), dropped, "decoded CSV document");
    entries
}

/// Split one CSV line into trimmed fields
///
/// A double quote toggles the quoted state; inside a quoted span `""` yields
/// one literal quote and commas are not separators.
pub fn split_csv_line(line: &str) -> StringRecord {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields.iter().map(|field| field.trim()).collect()
}

/// Read the number at the start of an hours cell
///
/// Spreadsheet exports often carry units (`4h`, `3.5 hrs`), so the longest
/// leading decimal literal is used: optional sign, digits, optional fraction,
/// optional exponent. A cell with no leading number reads as `0`.
fn parse_hours(cell: &str) -> f64 {
    let bytes = cell.trim_start().as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    std::str::from_utf8(&bytes[..end])
        .ok()
        .and_then(|literal| literal.parse().ok())
        .unwrap_or(0.0)
}

/// Wrap a text field in quotes, doubling embedded quotes
fn quote_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Position of each known column in the header, if present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ColumnIndex {
    date: Option<usize>,
    project: Option<usize>,
    hours: Option<usize>,
    note: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &StringRecord) -> Self {
        let names: Vec<String> = header.iter().map(str::to_lowercase).collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        Self {
            date: find("date"),
            project: find("project"),
            hours: find("hours"),
            note: find("note"),
        }
    }

    fn decode_row(&self, record: &StringRecord) -> Option<TimesheetEntry> {
        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");

        let hours = parse_hours(cell(self.hours));
        let entry = TimesheetEntry::new(cell(self.date), cell(self.project), hours, cell(self.note));

        entry.is_valid().then_some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(entries: &[TimesheetEntry]) -> Vec<(String, String, f64, String)> {
        entries
            .iter()
            .map(|e| (e.date.clone(), e.project.clone(), e.hours, e.note.clone()))
            .collect()
    }

    #[test]
    fn test_encode_layout() {
        let entries = vec![
            TimesheetEntry::new("2024-01-05", "Acme", 3.5, "kickoff"),
            TimesheetEntry::new("2024-01-06", "Acme", 2.0, ""),
        ];

        assert_eq!(
            to_csv(&entries),
            "date,project,hours,note\n\
             \"2024-01-05\",\"Acme\",3.5,\"kickoff\"\n\
             \"2024-01-06\",\"Acme\",2,\"\""
        );
    }

    #[test]
    fn test_encode_empty_is_header_only() {
        assert_eq!(to_csv(&[]), "date,project,hours,note");
    }

    #[test]
    fn test_encode_escapes_quotes() {
        let entries = vec![TimesheetEntry::new("2024-01-05", "Say \"hi\"", 1.0, "")];
        assert!(to_csv(&entries).contains("\"Say \"\"hi\"\"\""));
    }

    #[test]
    fn test_round_trip_preserves_fields_and_order() {
        let entries = vec![
            TimesheetEntry::new("2024-01-06", "Beta", 1.25, "second"),
            TimesheetEntry::new("2024-01-05", "Acme", 3.5, "kickoff"),
            TimesheetEntry::new("2024-01-05", "Acme", 3.5, "kickoff"),
            TimesheetEntry::new("2024-02-01", "Gamma", 8.0, ""),
        ];

        let decoded = from_csv(&to_csv(&entries));
        assert_eq!(content(&decoded), content(&entries));
    }

    #[test]
    fn test_round_trip_quote_and_comma_in_project() {
        let entries = vec![TimesheetEntry::new(
            "2024-01-05",
            "Acme, \"Big\" Co",
            2.0,
            "a, b and \"c\"",
        )];

        let decoded = from_csv(&to_csv(&entries));
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].project, "Acme, \"Big\" Co");
        assert_eq!(decoded[0].note, "a, b and \"c\"");
    }

    #[test]
    fn test_decode_assigns_fresh_ids() {
        let entries = vec![TimesheetEntry::new("2024-01-05", "Acme", 1.0, "")];
        let decoded = from_csv(&to_csv(&entries));
        assert_ne!(decoded[0].id, entries[0].id);
    }

    #[test]
    fn test_decode_reordered_columns() {
        let text = "project,date,hours,note\n\
                    \"Website\",\"2024-03-01\",4,\"design review\"\n\
                    Mobile,2024-03-02,1.5,standup";

        let decoded = from_csv(text);
        assert_eq!(
            content(&decoded),
            vec![
                (
                    "2024-03-01".to_string(),
                    "Website".to_string(),
                    4.0,
                    "design review".to_string()
                ),
                (
                    "2024-03-02".to_string(),
                    "Mobile".to_string(),
                    1.5,
                    "standup".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_decode_quoted_header_names() {
        let decoded = from_csv("\"Date\",\"Project\",\"Hours\"\n2024-01-01,Acme,2");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].project, "Acme");
    }

    #[test]
    fn test_decode_header_is_case_insensitive() {
        let text = "Note , HOURS,Date,Project\nfoo,2,2024-01-01,Acme";
        let decoded = from_csv(text);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].note, "foo");
        assert_eq!(decoded[0].hours, 2.0);
        assert_eq!(decoded[0].project, "Acme");
    }

    #[test]
    fn test_decode_missing_note_column_defaults_to_empty() {
        let decoded = from_csv("date,project,hours\n2024-01-01,Acme,2");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].note, "");
    }

    #[test]
    fn test_decode_missing_hours_column_drops_every_row() {
        assert!(from_csv("date,project,note\n2024-01-01,Acme,x").is_empty());
    }

    #[test]
    fn test_decode_blank_lines_are_ignored() {
        let compact = "date,project,hours,note\n\
                       \"2024-01-05\",\"Acme\",3.5,\"kickoff\"\n\
                       \"2024-01-06\",\"Acme\",2,\"\"";
        let spaced = "\n\ndate,project,hours,note\r\n\r\n\
                      \"2024-01-05\",\"Acme\",3.5,\"kickoff\"\r\n\n\n\
                      \"2024-01-06\",\"Acme\",2,\"\"\n\n";

        assert_eq!(content(&from_csv(spaced)), content(&from_csv(compact)));
        assert_eq!(from_csv(compact).len(), 2);
    }

    #[test]
    fn test_decode_drops_invalid_rows() {
        let text = "date,project,hours,note\n\
                    2024-01-01,Acme,abc,bad hours\n\
                    2024-01-01,Acme,0,zero hours\n\
                    2024-01-01,Acme,-1,negative hours\n\
                    2024-01-01,,2,no project\n\
                    ,Acme,2,no date\n\
                    2024-01-01,Acme,inf,infinite";

        assert!(from_csv(text).is_empty());
    }

    #[test]
    fn test_decode_hours_with_units() {
        let text = "date,project,hours,note\n\
                    2024-01-01,Acme,4h,x\n\
                    2024-01-02,Acme,3.5 hrs,y\n\
                    2024-01-03,Acme,abc,z";

        let decoded = from_csv(text);
        let hours: Vec<_> = decoded.iter().map(|e| e.hours).collect();
        assert_eq!(hours, vec![4.0, 3.5]);
        assert_eq!(decoded[1].note, "y");
    }

    #[test]
    fn test_parse_hours_leading_number() {
        assert_eq!(parse_hours("4h"), 4.0);
        assert_eq!(parse_hours("3.5 hrs"), 3.5);
        assert_eq!(parse_hours(".75"), 0.75);
        assert_eq!(parse_hours("2.h"), 2.0);
        assert_eq!(parse_hours("+1.5e1x"), 15.0);
        assert_eq!(parse_hours("3e"), 3.0);
        assert_eq!(parse_hours("-2h"), -2.0);
        assert_eq!(parse_hours("abc"), 0.0);
        assert_eq!(parse_hours("."), 0.0);
        assert_eq!(parse_hours(""), 0.0);
        assert_eq!(parse_hours("inf"), 0.0);
        assert!(parse_hours("1e999").is_infinite());
    }

    #[test]
    fn test_decode_drops_overflowing_hours() {
        assert!(from_csv("date,project,hours\n2024-01-01,Acme,1e999").is_empty());
    }

    #[test]
    fn test_decode_empty_and_header_only() {
        assert!(from_csv("").is_empty());
        assert!(from_csv("\n\r\n\n").is_empty());
        assert!(from_csv("date,project,hours,note").is_empty());
        assert!(from_csv("date,project,hours,note\n").is_empty());
    }

    #[test]
    fn test_decode_end_to_end_scenario() {
        let text = "date,project,hours,note\n\
                    \"2024-03-01\",\"Website\",4,\"design review\"\n\
                    \"2024-03-01\",\"Website\",0,\"skip me\"\n";

        let decoded = from_csv(text);
        assert_eq!(
            content(&decoded),
            vec![(
                "2024-03-01".to_string(),
                "Website".to_string(),
                4.0,
                "design review".to_string()
            )]
        );
    }

    #[test]
    fn test_decode_passes_date_text_through() {
        let decoded = from_csv("date,project,hours\n03/01/2024,Acme,1");
        assert_eq!(decoded[0].date, "03/01/2024");
    }

    #[test]
    fn test_split_plain_fields_are_trimmed() {
        let record = split_csv_line(" a , b,c ");
        assert_eq!(record.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_comma_and_escaped_quote() {
        let record = split_csv_line(r#""a,b","say ""hi""",3"#);
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec!["a,b", "say \"hi\"", "3"]
        );
    }

    #[test]
    fn test_split_empty_fields() {
        let record = split_csv_line(r#","","#);
        assert_eq!(record.iter().collect::<Vec<_>>(), vec!["", "", ""]);
    }

    #[test]
    fn test_split_quote_toggles_mid_field() {
        let record = split_csv_line(r#"ab"c,d"e,f"#);
        assert_eq!(record.iter().collect::<Vec<_>>(), vec!["abc,de", "f"]);
    }
}
