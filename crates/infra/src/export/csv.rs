use async_trait::async_trait;

use stockops_bulkops::{ExportEncoder, ExportError, ExportFormat};

/// CSV byte encoder (RFC 4180 quoting).
///
/// Handles the `csv` format only; `excel` bytes come from the external
/// spreadsheet collaborator wired in production.
#[derive(Debug, Default)]
pub struct CsvEncoder;

impl CsvEncoder {
    pub fn new() -> Self {
        Self
    }

    fn write_row(out: &mut String, fields: impl Iterator<Item = impl AsRef<str>>) {
        let mut first = true;
        for field in fields {
            if !first {
                out.push(',');
            }
            first = false;
            push_field(out, field.as_ref());
        }
        out.push('\n');
    }
}

fn push_field(out: &mut String, field: &str) {
    let needs_quoting = field
        .chars()
        .any(|c| matches!(c, ',' | '"' | '\n' | '\r'));
    if !needs_quoting {
        out.push_str(field);
        return;
    }
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

#[async_trait]
impl ExportEncoder for CsvEncoder {
    async fn encode(
        &self,
        format: ExportFormat,
        columns: &[&str],
        rows: &[Vec<String>],
    ) -> Result<Vec<u8>, ExportError> {
        if format != ExportFormat::Csv {
            return Err(ExportError::Encode(format!(
                "{format} encoding is delegated to the spreadsheet collaborator"
            )));
        }

        let mut out = String::new();
        Self::write_row(&mut out, columns.iter());
        for row in rows {
            Self::write_row(&mut out, row.iter());
        }
        Ok(out.into_bytes())
    }
}
