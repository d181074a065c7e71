//! Lenient serde deserializers for admin form payloads.
//!
//! The admin panel posts numbers either as JSON numbers or as the raw text
//! of an input field (`"5"`, `" 12.5 "`). These helpers accept both and
//! leave range checks to `validator`. Optional variants treat `null` and
//! blank strings as absent; use them with `#[serde(default, ...)]`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
}

fn parse_f64<E: de::Error>(value: Loose) -> Result<Option<f64>, E> {
    match value {
        Loose::Int(n) => Ok(Some(n as f64)),
        Loose::Float(n) => Ok(Some(n)),
        Loose::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.replace(',', ".")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("'{s}' is not a number")))
        }
    }
}

fn parse_i32<E: de::Error>(value: Loose) -> Result<Option<i32>, E> {
    let n = match value {
        Loose::Int(n) => n,
        Loose::Float(f) if f.fract() == 0.0 => f as i64,
        Loose::Float(f) => return Err(E::custom(format!("{f} is not a whole number"))),
        Loose::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>()
                .map_err(|_| E::custom(format!("'{s}' is not a whole number")))?
        }
    };
    i32::try_from(n)
        .map(Some)
        .map_err(|_| E::custom(format!("{n} is out of range")))
}

/// Optional integer from a number, numeric string, blank string or null.
pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    match Option::<Loose>::deserialize(d)? {
        Some(v) => parse_i32(v),
        None => Ok(None),
    }
}

/// Optional float from a number, numeric string, blank string or null.
pub fn opt_float<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Option::<Loose>::deserialize(d)? {
        Some(v) => parse_f64(v),
        None => Ok(None),
    }
}

/// Optional string, trimmed, with blank values treated as absent.
pub fn opt_trimmed<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(d)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Optional boolean from a JSON bool or the strings `"true"`/`"false"`/
/// `"on"`/`"1"`/`"0"`.
pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseBool {
        Bool(bool),
        Text(String),
    }

    match Option::<LooseBool>::deserialize(d)? {
        None => Ok(None),
        Some(LooseBool::Bool(b)) => Ok(Some(b)),
        Some(LooseBool::Text(s)) => match s.trim() {
            "" => Ok(None),
            "true" | "on" | "1" => Ok(Some(true)),
            "false" | "off" | "0" => Ok(Some(false)),
            other => Err(de::Error::custom(format!("'{other}' is not a boolean"))),
        },
    }
}
