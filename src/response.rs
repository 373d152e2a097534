//! Acknowledgement envelopes for create, update and delete.

use crate::case::to_camel_case;
use crate::config::{EntityDef, EnvelopeStyle};
use serde_json::{json, Value};

/// Envelope carrying the id generated by an insert.
pub fn created(entity: &EntityDef, id: i32, style: EnvelopeStyle) -> Value {
    match style {
        EnvelopeStyle::Structured => json!({ "id": id }),
        EnvelopeStyle::Legacy => Value::String(format!("{}Id : {}", to_camel_case(entity.table), id)),
    }
}

/// Fixed success envelope for update and delete.
pub fn success(style: EnvelopeStyle) -> Value {
    match style {
        EnvelopeStyle::Structured => json!({ "status": "SUCCESS", "code": 200 }),
        EnvelopeStyle::Legacy => Value::String("SUCCESS : 200".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionChoice, Record};

    #[test]
    fn legacy_envelopes_are_json_strings() {
        let v = created(QuestionChoice::entity(), 7, EnvelopeStyle::Legacy);
        assert_eq!(v.to_string(), r#""questionChoiceId : 7""#);
        assert_eq!(success(EnvelopeStyle::Legacy).to_string(), r#""SUCCESS : 200""#);
    }

    #[test]
    fn structured_envelopes_are_objects() {
        let v = created(QuestionChoice::entity(), 7, EnvelopeStyle::Structured);
        assert_eq!(v, json!({ "id": 7 }));
        assert_eq!(success(EnvelopeStyle::Structured)["code"], 200);
    }
}
