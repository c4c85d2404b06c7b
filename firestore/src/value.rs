//! Conversão entre JSON comum e o formato de valores do Firestore
//!
//! A API REST envolve cada campo em um objeto com o tipo explícito:
//! `{"stringValue": "x"}`, `{"integerValue": "42"}`, `{"mapValue": {...}}`.
//! Inteiros chegam como *string* no JSON da API.

use serde_json::{json, Map, Value};

/// Converte um `serde_json::Value` para o formato de valor do Firestore.
pub fn to_firestore(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // integerValue é sempre string na API REST
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(to_firestore).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": wrap_fields(map) } }),
    }
}

/// Converte um valor do Firestore de volta para `serde_json::Value`.
pub fn from_firestore(value: &Value) -> Value {
    let Some(map) = value.as_object() else {
        return Value::Null;
    };

    if map.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(b) = map.get("booleanValue") {
        return b.clone();
    }
    if let Some(i) = map.get("integerValue") {
        // pode vir como string ("42") ou número, dependendo do emissor
        let parsed = match i {
            Value::String(s) => s.parse::<i64>().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        };
        return parsed.map(|v| json!(v)).unwrap_or(Value::Null);
    }
    if let Some(d) = map.get("doubleValue") {
        return d.clone();
    }
    if let Some(s) = map.get("stringValue") {
        return s.clone();
    }
    if let Some(t) = map.get("timestampValue") {
        return t.clone();
    }
    if let Some(arr) = map.get("arrayValue") {
        let values = arr
            .get("values")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(from_firestore).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(m) = map.get("mapValue") {
        let fields = m
            .get("fields")
            .and_then(|f| f.as_object())
            .map(unwrap_fields)
            .unwrap_or_default();
        return Value::Object(fields);
    }

    Value::Null
}

/// Envolve todos os campos de um objeto JSON no formato do Firestore.
pub fn wrap_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), to_firestore(v)))
        .collect()
}

/// Desempacota o mapa `fields` de um documento para JSON comum.
pub fn unwrap_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), from_firestore(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_primitivos() {
        let original = json!({
            "titulo": "Casa no centro",
            "preco": 350000.5,
            "quartos": 3,
            "disponivel": true,
            "videoUrl": null
        });

        let wrapped = wrap_fields(original.as_object().unwrap());
        assert_eq!(wrapped["titulo"], json!({ "stringValue": "Casa no centro" }));
        assert_eq!(wrapped["quartos"], json!({ "integerValue": "3" }));
        assert_eq!(wrapped["disponivel"], json!({ "booleanValue": true }));

        let unwrapped = unwrap_fields(&wrapped);
        assert_eq!(Value::Object(unwrapped), original);
    }

    #[test]
    fn test_roundtrip_aninhado() {
        let original = json!({
            "endereco": { "cidade": "Goiânia", "numero": "120" },
            "fotos": ["https://a.jpg", "https://b.jpg"],
            "etapas": [
                { "nome": "Verificação de Matrícula", "status": "pendente" }
            ]
        });

        let wrapped = wrap_fields(original.as_object().unwrap());
        let unwrapped = unwrap_fields(&wrapped);
        assert_eq!(Value::Object(unwrapped), original);
    }

    #[test]
    fn test_integer_value_como_string() {
        // A API REST devolve integerValue como string
        let fs = json!({ "integerValue": "1500" });
        assert_eq!(from_firestore(&fs), json!(1500));
    }

    #[test]
    fn test_timestamp_value_vira_string() {
        let fs = json!({ "timestampValue": "2026-08-07T12:00:00Z" });
        assert_eq!(from_firestore(&fs), json!("2026-08-07T12:00:00Z"));
    }

    #[test]
    fn test_valor_desconhecido_vira_null() {
        let fs = json!({ "geoPointValue": { "latitude": 0.0, "longitude": 0.0 } });
        assert_eq!(from_firestore(&fs), Value::Null);
    }
}
