use serde::de::DeserializeOwned;
use tally_core::entities::Actor;
use tally_core::enums::Role;

/// Parse a `snake_case` enum value using serde deserialization.
///
/// Hyphens are accepted in place of underscores.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Build the acting user from `--actor-id` and `--actor-role`.
pub fn parse_actor(id: &str, role: &str) -> anyhow::Result<Actor> {
    if id.trim().is_empty() {
        anyhow::bail!("--actor-id must not be empty");
    }
    Ok(Actor::new(id, parse_enum::<Role>(role, "actor role")?))
}
