use camino::{Utf8Path, Utf8PathBuf};
use snafu::prelude::*;

use std::fs;
use std::io::Read;

use crate::error::*;
use crate::fusion::{Dashboard, Panel, PanelSource};

/// Path standing for the standard input.
pub const STDIN: &str = "-";

/// Reads a whole file, or the standard input when `path` is [`STDIN`].
///
/// Errors when:
///   - `path` does not exist or is not readable
///   - the content is not valid UTF-8
pub fn read<T: AsRef<Utf8Path>>(path: T) -> Result<String, Error> {
    let path = path.as_ref();
    if path.as_str() == STDIN {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context(StdinReadSnafu)?;
        return Ok(content);
    }

    fs::read_to_string(path).context(PathReadSnafu {
        path: path.to_path_buf(),
    })
}

/// Loads a dashboard document.
pub fn read_dashboard<T: AsRef<Utf8Path>>(path: T) -> Result<Dashboard, Error> {
    let path = path.as_ref();
    debug!("Loading dashboard from {path}");
    Dashboard::from_json(&read(path)?).context(DashboardLoadSnafu {
        path: path.to_path_buf(),
    })
}

/// Loads the panels of every source, in order. Each source is a path or a glob
/// pattern, and holds either a single panel or a list of panels.
pub fn read_panel_sources<T: AsRef<str>>(sources: &[T]) -> Result<Vec<Panel>, Error> {
    let mut panels: Vec<Panel> = Vec::new();

    for path in expand_sources(sources)? {
        let source = PanelSource::from_json(&read(&path)?).context(PanelSourceLoadSnafu {
            path: path.clone(),
        })?;
        let source = source.into_panels();
        debug!("Loaded {} panels from {path}", source.len());
        panels.extend(source);
    }

    Ok(panels)
}

/// Whether `pattern` should be expanded with [`glob`] instead of read as is.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Turns every glob pattern into the paths it matches. Other paths are kept as is.
///
/// Errors when a pattern is invalid or does not match anything.
pub fn expand_sources<T: AsRef<str>>(sources: &[T]) -> Result<Vec<Utf8PathBuf>, Error> {
    let mut paths: Vec<Utf8PathBuf> = Vec::new();

    for source in sources {
        let source = source.as_ref();
        if !is_glob(source) {
            paths.push(Utf8PathBuf::from(source));
            continue;
        }

        let matches = glob(source)?;
        ensure!(
            !matches.is_empty(),
            GlobNoMatchSnafu {
                pattern: source.to_string()
            }
        );
        paths.extend(matches);
    }

    Ok(paths)
}

/// Lists the paths matching `pattern`, in alphabetical order.
pub fn glob(pattern: &str) -> Result<Vec<Utf8PathBuf>, Error> {
    let mut files: Vec<Utf8PathBuf> = vec![];

    for entry in glob::glob(pattern).context(GlobPatternSnafu {
        pattern: pattern.to_string(),
    })? {
        let entry = entry.context(GlobSnafu)?;
        let utf8_entry = match Utf8PathBuf::from_path_buf(entry) {
            Ok(p) => p,
            Err(entry_path) => {
                return Err(Error::InvalidUnicodePath { path: entry_path });
            }
        };
        files.push(utf8_entry);
    }

    Ok(files)
}
