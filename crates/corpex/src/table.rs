//! Delimited output for flattened rows and extracted sentences

use std::io::Write;

use crate::error::Result;
use crate::flatten::PathValue;

const HEADER: &str = "file,path,value";

/// Streaming CSV writer: one row per path/value pair, with a leading
/// column naming the source file.
#[derive(Debug)]
pub struct CsvWriter<W: Write> {
    out: W,
}

impl<W: Write> CsvWriter<W> {
    /// Write the header row and wrap the destination.
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{HEADER}")?;
        Ok(Self { out })
    }

    /// Append every row from one source file.
    pub fn write_rows<I>(&mut self, source: &str, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = PathValue>,
    {
        for row in rows {
            writeln!(
                self.out,
                "{},{},{}",
                escape_field(source),
                escape_field(&row.path),
                escape_field(&row.value)
            )?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// CSV output for a single source, built in memory.
pub fn csv_string<I>(source: &str, rows: I) -> String
where
    I: IntoIterator<Item = PathValue>,
{
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&escape_field(source));
        out.push(',');
        out.push_str(&escape_field(&row.path));
        out.push(',');
        out.push_str(&escape_field(&row.value));
        out.push('\n');
    }
    out
}

/// One sentence per line.
pub fn text_string<I>(sentences: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    for sentence in sentences {
        out.push_str(&sentence);
        out.push('\n');
    }
    out
}

/// Stream sentences to a writer, one per line.
pub fn write_text<W: Write, I>(mut out: W, sentences: I) -> Result<()>
where
    I: IntoIterator<Item = String>,
{
    for sentence in sentences {
        writeln!(out, "{sentence}")?;
    }
    Ok(())
}

/// Quote a field when it contains the delimiter, a quote or a line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
