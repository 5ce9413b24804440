use std::path::Path;

use dsc_core::{ConfigurationError, SurfaceCatalog, SurfaceConfig, Vec3Config};
use serde_json::Value;

use crate::error::{IoError, Result};

const DOCUMENT: &str = "display surface";

/// Read a display geometry document from disk
pub fn load_surface_config<P: AsRef<Path>>(path: P) -> Result<SurfaceConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = serde_json::from_str(&text)?;
    let config = parse_surface_config(&root)?;

    tracing::info!(path = %path.display(), model = config.model_name(), "loaded display geometry");
    Ok(config)
}

/// Read a display geometry document and build its surface
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<SurfaceCatalog> {
    let config = load_surface_config(path)?;
    Ok(SurfaceCatalog::from_config(&config)?)
}

/// Extract a [`SurfaceConfig`] from a parsed display geometry document
///
/// Every missing or mistyped field is reported by name.
pub fn parse_surface_config(
    root: &Value,
) -> std::result::Result<SurfaceConfig, ConfigurationError> {
    if !root.is_object() {
        return Err(ConfigurationError::WrongType {
            context: DOCUMENT.to_string(),
            field: "(document)".to_string(),
            expected: "object",
        });
    }

    let model = root
        .get("model")
        .ok_or_else(|| missing(DOCUMENT, "model"))?
        .as_str()
        .ok_or_else(|| wrong_type(DOCUMENT, "model", "string"))?;

    match model {
        "cylinder" => Ok(SurfaceConfig::Cylinder {
            radius: parse_number(root, model, "radius")?,
            base: parse_vec3(root, model, "base")?,
            axis: parse_vec3(root, model, "axis")?,
        }),
        "sphere" => Ok(SurfaceConfig::Sphere {
            radius: parse_number(root, model, "radius")?,
            center: parse_vec3(root, model, "center")?,
        }),
        other => Err(ConfigurationError::UnknownModel(other.to_string())),
    }
}

fn parse_number(
    object: &Value,
    context: &str,
    key: &str,
) -> std::result::Result<f64, ConfigurationError> {
    object
        .get(key)
        .ok_or_else(|| missing(context, key))?
        .as_f64()
        .ok_or_else(|| wrong_type(context, key, "number"))
}

fn parse_vec3(
    object: &Value,
    context: &str,
    key: &str,
) -> std::result::Result<Vec3Config, ConfigurationError> {
    let value = object.get(key).ok_or_else(|| missing(context, key))?;
    if !value.is_object() {
        return Err(wrong_type(context, key, "object"));
    }

    let inner = format!("{}.{}", context, key);
    Ok(Vec3Config {
        x: parse_number(value, &inner, "x")?,
        y: parse_number(value, &inner, "y")?,
        z: parse_number(value, &inner, "z")?,
    })
}

fn missing(context: &str, field: &str) -> ConfigurationError {
    ConfigurationError::MissingField {
        context: context.to_string(),
        field: field.to_string(),
    }
}

fn wrong_type(context: &str, field: &str, expected: &'static str) -> ConfigurationError {
    ConfigurationError::WrongType {
        context: context.to_string(),
        field: field.to_string(),
        expected,
    }
}
