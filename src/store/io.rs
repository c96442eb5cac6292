//! store/io: (де)сериализация документа коллекции.
//!
//! Документ: JSON-объект `{ key: record, ... }`. Разбор в два шага:
//! 1) весь документ как упорядоченная карта key -> serde_json::Value;
//! 2) каждая запись отдельно в типизированный Record + Record::validate().
//!
//! Если не удался шаг 1: документ нечитаем целиком (Unreadable).
//! Если не удался шаг 2 для части записей: они уходят в `rejected`,
//! остальные загружаются как обычно.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::model::{Collection, Record};

/// A record that failed typed decoding or validation.
#[derive(Debug, Clone)]
pub struct Rejected {
    pub key: String,
    pub raw: Value,
    pub reason: String,
}

#[derive(Debug)]
pub enum Decoded<T> {
    Ok {
        records: Collection<T>,
        rejected: Vec<Rejected>,
    },
    Unreadable(String),
}

pub fn decode_document<T: Record>(bytes: &[u8]) -> Decoded<T> {
    let raw: IndexMap<String, Value> = match serde_json::from_slice(bytes) {
        Ok(m) => m,
        Err(e) => return Decoded::Unreadable(e.to_string()),
    };

    let mut records = Collection::with_capacity(raw.len());
    let mut rejected = Vec::new();
    for (key, value) in raw {
        let decoded = serde_json::from_value::<T>(value.clone())
            .map_err(anyhow::Error::from)
            .and_then(|r| r.validate().map(|_| r));
        match decoded {
            Ok(r) => {
                records.insert(key, r);
            }
            Err(e) => rejected.push(Rejected {
                key,
                raw: value,
                reason: format!("{e:#}"),
            }),
        }
    }
    Decoded::Ok { records, rejected }
}

pub fn encode_document<S: Serialize + ?Sized>(doc: &S, pretty: bool) -> Result<Vec<u8>> {
    let mut out = if pretty {
        to_vec_pretty4(doc)?
    } else {
        serde_json::to_vec(doc).context("serialize document")?
    };
    out.push(b'\n');
    Ok(out)
}

// serde_json::to_vec_pretty даёт отступ в 2 пробела; документы исторически с 4.
fn to_vec_pretty4<S: Serialize + ?Sized>(doc: &S) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    doc.serialize(&mut ser).context("serialize document")?;
    Ok(buf)
}
