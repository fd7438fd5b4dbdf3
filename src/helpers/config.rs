use camino::Utf8Path;
use snafu::prelude::*;

use crate::error::*;
use crate::fusion::{LayoutConfig, Placement};
use crate::helpers::file;

/// Settings read from the optional TOML configuration file.
///
/// ```toml
/// placement = "top"
///
/// [layout]
/// grid_width = 24
/// default_width = 6
/// default_height = 2
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FusionConfig {
    /// Where new groups go when `--top` is not passed
    pub placement: Placement,
    pub layout: LayoutConfig,
}

impl FusionConfig {
    pub fn from_toml(content: &str) -> Result<FusionConfig, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the configuration file, or the defaults when there is none.
    ///
    /// Errors when the file cannot be read or parsed, or when a layout size is
    /// not strictly positive.
    pub fn load(path: Option<&Utf8Path>) -> Result<FusionConfig, Error> {
        let Some(path) = path else {
            return Ok(FusionConfig::default());
        };

        debug!("Loading configuration from {path}");
        let content = file::read(path).context(ConfigReadSnafu {
            path: path.to_path_buf(),
        })?;
        let config = Self::from_toml(&content).context(ConfigTomlSnafu {
            path: path.to_path_buf(),
        })?;

        if let Some((field, value)) = config.layout.invalid_field() {
            return ConfigLayoutSnafu {
                path: path.to_path_buf(),
                field,
                value,
            }
            .fail();
        }

        Ok(config)
    }

    /// The `--top` flag wins over the configured placement.
    pub fn placement(&self, top: bool) -> Placement {
        if top {
            Placement::Top
        } else {
            self.placement
        }
    }
}
