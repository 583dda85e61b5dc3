//! Environment variable source: VOLFILL_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses VOLFILL_ prefix and __ as separator for nested keys, e.g.
/// `VOLFILL__GENERATION__WORKERS=4`. `VOLFILL__FETCH__SOURCES` is a comma list.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("VOLFILL")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("fetch.sources"),
    );
    Ok(builder)
}
