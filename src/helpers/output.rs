use camino::Utf8Path;
use serde_json::value::RawValue;
use snafu::prelude::*;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;

use crate::error::*;
use crate::fusion::{Dashboard, Panel};

/// A dashboard field as it is written out: the panels list is laid out one
/// panel field per line, every other value is the exact text it was read from.
#[derive(Serialize)]
#[serde(untagged)]
enum OutputField<'a> {
    Panels(Vec<Panel>),
    Raw(&'a RawValue),
}

/// Encodes the dashboard as JSON, pretty-printed unless `compact` is set.
///
/// Field values are never decoded again, so numbers and string escapes come
/// out exactly as they came in.
pub fn format_dashboard(dashboard: &Dashboard, compact: bool) -> Result<String, Error> {
    let fields: BTreeMap<&str, OutputField> = dashboard
        .iter()
        .map(|(key, raw)| {
            let field = match key.as_str() {
                "panels" => serde_json::from_str::<Vec<Panel>>(raw.get())
                    .map(OutputField::Panels)
                    .unwrap_or(OutputField::Raw(&**raw)),
                _ => OutputField::Raw(&**raw),
            };
            (key.as_str(), field)
        })
        .collect();

    let output = if compact {
        serde_json::to_string(&fields)
    } else {
        serde_json::to_string_pretty(&fields)
    };
    output.context(OutputJsonSnafu)
}

/// Writes `content` followed by a newline, to `path` or to the standard output.
pub fn write(path: Option<&Utf8Path>, content: &str) -> Result<(), Error> {
    match path {
        Some(path) => {
            debug!("Writing output to {path}");
            fs::write(path, format!("{content}\n")).context(OutputWriteSnafu {
                path: path.to_path_buf(),
            })
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}").context(StdoutWriteSnafu)?;
            stdout.flush().context(StdoutWriteSnafu)
        }
    }
}

/// Logs the error along with its sources, and exits with a non-zero status.
pub fn exit_result<T>(res: Result<T, Error>) {
    if let Err(e) = res {
        error!("{e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            error!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }
        std::process::exit(1);
    }
}
