// Interpretazione delle risposte dell'API di verifica.
//
// The API has shipped two response formats over time. Shape v2 nests the
// verdict under `prediction.status.success`, v1 exposes a flat `OK` flag.
// Anything else is kept as raw JSON and rendered without a badge.
use serde::Deserialize;
use serde_json::Value;

pub const LABEL_SUCCESS: &str = "Success";
pub const LABEL_FAILED: &str = "Failed";

/// Outcome of one pipeline stage (detection, segmentation) in a v2 response.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StageResult {
    #[serde(default, deserialize_with = "lenient")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct V2Response {
    pub success: bool,
    pub message: Option<String>,
    pub detection: Option<StageResult>,
    pub segmentation: Option<StageResult>,
    pub original_filename: Option<String>,
    pub dimensions: Option<(u64, u64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct V1Response {
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerificationResponse {
    V2(V2Response),
    V1(V1Response),
    Unrecognized(Value),
}

/// Presentation class of a classified result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Affirmative,
    Error,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub success: Option<bool>,
    pub label: Option<&'static str>,
}

impl Classification {
    pub const UNKNOWN: Classification = Classification { success: None, label: None };

    fn from_flag(flag: bool) -> Self {
        Classification {
            success: Some(flag),
            label: Some(if flag { LABEL_SUCCESS } else { LABEL_FAILED }),
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self.success {
            Some(true) => StatusTone::Affirmative,
            Some(false) => StatusTone::Error,
            None => StatusTone::Neutral,
        }
    }
}

impl VerificationResponse {
    /// Decode `value` as v2, then v1, falling back to `Unrecognized`.
    ///
    /// Paths are only followed through JSON objects and the flags must be
    /// real booleans; an array or a string `"true"` never matches.
    pub fn decode(value: &Value) -> Self {
        if let Some(v2) = decode_v2(value) {
            return VerificationResponse::V2(v2);
        }
        if let Some(v1) = decode_v1(value) {
            return VerificationResponse::V1(v1);
        }
        VerificationResponse::Unrecognized(value.clone())
    }

    pub fn classification(&self) -> Classification {
        match self {
            VerificationResponse::V2(v2) => Classification::from_flag(v2.success),
            VerificationResponse::V1(v1) => Classification::from_flag(v1.ok),
            VerificationResponse::Unrecognized(_) => Classification::UNKNOWN,
        }
    }

    pub fn version(&self) -> Option<&'static str> {
        match self {
            VerificationResponse::V2(_) => Some("v2"),
            VerificationResponse::V1(_) => Some("v1"),
            VerificationResponse::Unrecognized(_) => None,
        }
    }

    /// Human readable line shown next to the badge, when the API gave one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            VerificationResponse::V2(v2) => v2.message.as_deref(),
            VerificationResponse::V1(v1) => v1.error.as_deref(),
            VerificationResponse::Unrecognized(_) => None,
        }
    }

    /// Summary lines for the v2 pipeline stages, e.g. `Detection: passed (0.97)`.
    pub fn stage_lines(&self) -> Vec<String> {
        let VerificationResponse::V2(v2) = self else {
            return Vec::new();
        };
        let mut lines = Vec::new();
        for (name, stage) in [("Detection", &v2.detection), ("Segmentation", &v2.segmentation)] {
            if let Some(stage) = stage {
                lines.push(format_stage(name, stage));
            }
        }
        lines
    }
}

/// Classify an optional result. Absent and JSON `null` are both unknown.
pub fn classify(result: Option<&Value>) -> Classification {
    match result {
        None | Some(Value::Null) => Classification::UNKNOWN,
        Some(value) => VerificationResponse::decode(value).classification(),
    }
}

/// Pretty JSON with two-space indentation, as shown in the result block.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn decode_v2(value: &Value) -> Option<V2Response> {
    let prediction = value.as_object()?.get("prediction")?;
    let status = prediction.as_object()?.get("status")?;
    let success = status.as_object()?.get("success")?.as_bool()?;

    let dimensions = match (
        value.get("width").and_then(Value::as_u64),
        value.get("height").and_then(Value::as_u64),
    ) {
        (Some(w), Some(h)) => Some((w, h)),
        _ => None,
    };

    Some(V2Response {
        success,
        message: status.get("message").and_then(Value::as_str).map(str::to_string),
        detection: stage(prediction, "detection"),
        segmentation: stage(prediction, "segmentation"),
        original_filename: value
            .get("original_filename")
            .and_then(Value::as_str)
            .map(str::to_string),
        dimensions,
    })
}

fn decode_v1(value: &Value) -> Option<V1Response> {
    let object = value.as_object()?;
    let ok = object.get("OK")?.as_bool()?;
    Some(V1Response {
        ok,
        error: object.get("error").and_then(Value::as_str).map(str::to_string),
    })
}

fn stage(prediction: &Value, key: &str) -> Option<StageResult> {
    let raw = prediction.get(key).filter(|v| v.is_object())?;
    StageResult::deserialize(raw).ok()
}

fn format_stage(name: &str, stage: &StageResult) -> String {
    let verdict = match stage.success {
        Some(true) => "passed",
        Some(false) => "failed",
        None => "n/a",
    };
    match stage.confidence {
        Some(c) => format!("{}: {} ({:.2})", name, verdict, c),
        None => format!("{}: {}", name, verdict),
    }
}

// Optional fields never make the whole stage fail to decode.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_v2_payload_is_decoded() {
        let body = json!({
            "width": 640,
            "height": 480,
            "original_filename": "me.jpg",
            "filename": "3f2a.jpg",
            "prediction": {
                "status": { "success": true, "message": "Face verified" },
                "detection": { "success": true, "confidence": 0.971, "view_bbox_path": null },
                "segmentation": { "success": false, "confidence": "n/a" },
                "view_original_path": null
            }
        });
        let parsed = VerificationResponse::decode(&body);
        let VerificationResponse::V2(v2) = &parsed else {
            panic!("expected v2, got {:?}", parsed);
        };
        assert!(v2.success);
        assert_eq!(v2.message.as_deref(), Some("Face verified"));
        assert_eq!(v2.dimensions, Some((640, 480)));
        assert_eq!(v2.original_filename.as_deref(), Some("me.jpg"));
        assert_eq!(
            parsed.stage_lines(),
            vec!["Detection: passed (0.97)".to_string(), "Segmentation: failed".to_string()]
        );
        assert_eq!(parsed.detail(), Some("Face verified"));
        assert_eq!(parsed.version(), Some("v2"));
    }

    #[test]
    fn v1_error_is_exposed_as_detail() {
        let parsed = VerificationResponse::decode(&json!({"OK": false, "error": "No face found"}));
        assert_eq!(parsed.detail(), Some("No face found"));
        assert_eq!(parsed.classification().tone(), StatusTone::Error);
        assert!(parsed.stage_lines().is_empty());
    }

    #[test]
    fn non_boolean_flags_do_not_match() {
        assert_eq!(classify(Some(&json!({"prediction": {"status": {"success": "yes"}}}))), Classification::UNKNOWN);
        assert_eq!(classify(Some(&json!({"OK": 1}))), Classification::UNKNOWN);
        // a broken v2 flag still lets a valid v1 flag through
        let c = classify(Some(&json!({"prediction": {"status": {"success": null}}, "OK": true})));
        assert_eq!(c.label, Some(LABEL_SUCCESS));
    }

    #[test]
    fn arrays_are_not_walked_as_objects() {
        let body = json!({"prediction": [{"status": {"success": true}}]});
        assert!(matches!(VerificationResponse::decode(&body), VerificationResponse::Unrecognized(_)));
        assert_eq!(classify(Some(&json!([true]))), Classification::UNKNOWN);
    }

    #[test]
    fn tone_follows_success_flag() {
        assert_eq!(Classification::from_flag(true).tone(), StatusTone::Affirmative);
        assert_eq!(Classification::from_flag(false).tone(), StatusTone::Error);
        assert_eq!(Classification::UNKNOWN.tone(), StatusTone::Neutral);
    }

    #[test]
    fn pretty_json_uses_two_spaces() {
        assert_eq!(pretty_json(&json!({"OK": true})), "{\n  \"OK\": true\n}");
    }
}
