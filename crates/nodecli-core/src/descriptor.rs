use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const MODULES_DIR: &str = "node_modules";
pub const PACKAGE_DESCRIPTOR_FILE: &str = "package.json";

/// The parts of a `package.json` needed to locate an executable.
///
/// Only syntax errors are fatal. Fields with an unexpected shape are kept or
/// dropped so that lookups simply miss.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PackageDescriptor {
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub bin: Option<Value>,
}

impl PackageDescriptor {
    pub fn from_json_str(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Script path declared for `executable`.
    ///
    /// A table maps executable names to paths; a single string is npm's
    /// shorthand for one executable named after the unscoped package name.
    pub fn bin_path(&self, executable: &str) -> Option<&str> {
        let path = match self.bin.as_ref()? {
            Value::Object(entries) => entries.get(executable)?.as_str()?,
            Value::String(path) => {
                if self.unscoped_name()? != executable {
                    return None;
                }
                path.as_str()
            }
            _ => return None,
        };
        if path.is_empty() {
            return None;
        }
        Some(path)
    }

    fn unscoped_name(&self) -> Option<&str> {
        let name = self.name.as_deref()?;
        Some(name.rsplit('/').next().unwrap_or(name))
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}
