use serde_json::{Map, Value as JsonValue};
use toml_edit::{DocumentMut, Item, Value, value};

/// Helpers for rewriting the version field of structured manifests.
pub struct ManifestUtils;

impl ManifestUtils {
    /// Parses a JSON manifest, sets `field` and renders it with two-space
    /// indentation and a single trailing newline. Key order is preserved.
    ///
    /// Returns the previous value of the field, if any, along with the text.
    pub fn set_json_field(
        content: &str,
        field: &str,
        new_version: &str,
    ) -> Result<(Option<JsonValue>, String), String> {
        let mut root: JsonValue =
            serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;

        let object: &mut Map<String, JsonValue> = root
            .as_object_mut()
            .ok_or_else(|| "top-level value is not an object".to_string())?;

        let previous = object.insert(
            field.to_string(),
            JsonValue::String(new_version.to_string()),
        );

        let mut rendered = serde_json::to_string_pretty(&root)
            .map_err(|e| format!("failed to serialize JSON: {e}"))?;
        rendered.push('\n');

        Ok((previous, rendered))
    }

    /// Parses a TOML manifest and sets the (possibly dotted) `field`, keeping
    /// comments and layout. Every table on the dotted path must already exist.
    pub fn set_toml_field(
        content: &str,
        field: &str,
        new_version: &str,
    ) -> Result<(Option<String>, String), String> {
        let mut doc: DocumentMut = content
            .parse()
            .map_err(|e| format!("invalid TOML: {e}"))?;

        let segments: Vec<&str> = field.split('.').collect();
        let (key, tables) = segments
            .split_last()
            .ok_or_else(|| "empty field name".to_string())?;

        let mut table = doc.as_table_mut() as &mut dyn toml_edit::TableLike;
        for (depth, segment) in tables.iter().enumerate() {
            table = table
                .get_mut(segment)
                .and_then(Item::as_table_like_mut)
                .ok_or_else(|| {
                    format!("table '{}' not found", segments[..=depth].join("."))
                })?;
        }

        let previous = table
            .get(key)
            .and_then(|item| item.as_str())
            .map(str::to_string);

        match table.get_mut(key) {
            Some(Item::Value(existing)) => {
                let decor = existing.decor().clone();
                *existing = Value::from(new_version);
                *existing.decor_mut() = decor;
            }
            _ => {
                table.insert(key, value(new_version));
            }
        }

        Ok((previous, Self::with_single_newline(&doc.to_string())))
    }

    fn with_single_newline(text: &str) -> String {
        let mut out = text.trim_end_matches(['\n', '\r']).to_string();
        out.push('\n');
        out
    }
}
