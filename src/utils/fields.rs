//! 请求字段的宽松解析。
//!
//! 旧客户端发送的 id 可能是数字也可能是数字字符串；必填检查沿用
//! “假值即缺失” 的规则：缺省、`null`、`0`、`""`、`false` 都视为没有提供。

use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

/// 解析标识符字段，假值返回 `None`
pub fn loose_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(None),
            Some(id) => i32::try_from(id)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("identifier out of range: {}", id))),
            None => Err(D::Error::custom(format!("identifier must be an integer: {}", n))),
        },
        Some(Value::String(s)) => parse_id(&s)
            .map_err(|_| D::Error::custom(format!("identifier must be numeric: {:?}", s))),
        Some(other) => Err(D::Error::custom(format!("unexpected identifier: {}", other))),
    }
}

/// 解析文本字段，空串返回 `None`；数字按原样转成文本
pub fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected text, got {}", other))),
    }
}

/// 按真值规则把任意 JSON 值转成布尔
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(is_truthy))
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 解析查询串或字符串形式的 id；空串或 `0` 视为缺失
pub fn parse_id(raw: &str) -> Result<Option<i32>, std::num::ParseIntError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let id = trimmed.parse::<i32>()?;
    Ok((id != 0).then_some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "loose_id")]
        id: Option<i32>,
        #[serde(default, deserialize_with = "loose_text")]
        nome: Option<String>,
        #[serde(default, deserialize_with = "truthy")]
        tecnico: bool,
    }

    fn sample(value: Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_id_accepts_number_and_numeric_string() {
        assert_eq!(sample(json!({"id": 5})).unwrap().id, Some(5));
        assert_eq!(sample(json!({"id": "12"})).unwrap().id, Some(12));
        assert_eq!(sample(json!({"id": " 3 "})).unwrap().id, Some(3));
    }

    #[test]
    fn test_falsy_ids_are_missing() {
        assert_eq!(sample(json!({})).unwrap().id, None);
        assert_eq!(sample(json!({"id": null})).unwrap().id, None);
        assert_eq!(sample(json!({"id": 0})).unwrap().id, None);
        assert_eq!(sample(json!({"id": ""})).unwrap().id, None);
        assert_eq!(sample(json!({"id": false})).unwrap().id, None);
    }

    #[test]
    fn test_garbage_ids_are_rejected() {
        assert!(sample(json!({"id": "abc"})).is_err());
        assert!(sample(json!({"id": 1.5})).is_err());
        assert!(sample(json!({"id": [1]})).is_err());
        assert!(sample(json!({"id": 9_999_999_999i64})).is_err());
    }

    #[test]
    fn test_text_presence() {
        assert_eq!(sample(json!({"nome": "Ana"})).unwrap().nome.as_deref(), Some("Ana"));
        assert_eq!(sample(json!({"nome": ""})).unwrap().nome, None);
        assert_eq!(sample(json!({"nome": null})).unwrap().nome, None);
        assert_eq!(sample(json!({"nome": 101})).unwrap().nome.as_deref(), Some("101"));
        assert!(sample(json!({"nome": {"x": 1}})).is_err());
    }

    #[test]
    fn test_tecnico_truthiness() {
        assert!(!sample(json!({})).unwrap().tecnico);
        assert!(sample(json!({"tecnico": true})).unwrap().tecnico);
        assert!(sample(json!({"tecnico": 1})).unwrap().tecnico);
        assert!(sample(json!({"tecnico": "sim"})).unwrap().tecnico);
        assert!(!sample(json!({"tecnico": 0})).unwrap().tecnico);
        assert!(!sample(json!({"tecnico": ""})).unwrap().tecnico);
        assert!(!sample(json!({"tecnico": null})).unwrap().tecnico);
    }

    #[test]
    fn test_parse_id_query_values() {
        assert_eq!(parse_id("4").unwrap(), Some(4));
        assert_eq!(parse_id("").unwrap(), None);
        assert_eq!(parse_id("0").unwrap(), None);
        assert!(parse_id("x").is_err());
    }
}
