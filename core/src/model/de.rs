use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
}

pub fn parse_loose_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Blank or missing is absent. Anything else is present, unparseable text as 0.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell: Option<Cell> = Option::deserialize(deserializer)?;
    Ok(match cell {
        None => None,
        Some(Cell::Number(n)) => Some(n),
        Some(Cell::Text(s)) if s.trim().is_empty() => None,
        Some(Cell::Text(s)) => Some(parse_loose_number(&s).unwrap_or(0.0)),
    })
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let cell: Option<Cell> = Option::deserialize(deserializer)?;
    Ok(match cell {
        Some(Cell::Number(n)) => n,
        Some(Cell::Text(s)) => parse_loose_number(&s).unwrap_or(0.0),
        None => 0.0,
    })
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    })
}
