// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sample lock configuration, as a typed snapshot and as wire JSON.

use lockcfg_core::{
    CommonEnumeratedParam, CommonIntRangedParam, ConfigSnapshot, EnumeratedParam, RangedParam,
    Range,
};
use serde_json::{json, Value};

/// Wire document equal to [`sample_snapshot`]. `lockAngle` omits `common`.
pub const SAMPLE_JSON: &str = r#"{
  "lockVoltage": { "values": ["No Power", "12V", "24V"], "default": "No Power" },
  "lockType": { "values": ["Fail-safe", "Fail-secure"], "default": "Fail-secure" },
  "lockKick": { "values": ["Off", "On"], "default": "Off" },
  "lockRelease": { "values": ["Always", "Timed", "Never"], "default": "Timed", "common": true },
  "lockReleaseTime": { "range": { "min": 0.0, "max": 10.0 }, "unit": "s", "default": 5.0 },
  "lockAngle": { "range": { "min": 0.0, "max": 360.0 }, "unit": "deg", "default": 45 }
}"#;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

/// Sample snapshot: `lockRelease` is common, `lockAngle` is not.
pub fn sample_snapshot() -> ConfigSnapshot {
    ConfigSnapshot {
        lock_voltage: EnumeratedParam {
            values: strings(&["No Power", "12V", "24V"]),
            default: "No Power".into(),
        },
        lock_type: EnumeratedParam {
            values: strings(&["Fail-safe", "Fail-secure"]),
            default: "Fail-secure".into(),
        },
        lock_kick: EnumeratedParam {
            values: strings(&["Off", "On"]),
            default: "Off".into(),
        },
        lock_release: CommonEnumeratedParam {
            values: strings(&["Always", "Timed", "Never"]),
            default: "Timed".into(),
            common: true,
        },
        lock_release_time: RangedParam {
            range: Range::new(0.0, 10.0),
            unit: "s".into(),
            default: 5.0,
        },
        lock_angle: CommonIntRangedParam {
            range: Range::new(0.0, 360.0),
            unit: "deg".into(),
            default: 45,
            common: false,
        },
    }
}

/// Sample snapshot with explicit `common` flags.
pub fn snapshot_with_common(release: bool, angle: bool) -> ConfigSnapshot {
    let mut snapshot = sample_snapshot();
    snapshot.lock_release.common = release;
    snapshot.lock_angle.common = angle;
    snapshot
}

/// [`SAMPLE_JSON`] as a JSON value (e.g. for mock HTTP bodies).
pub fn sample_json() -> Value {
    json!({
        "lockVoltage": { "values": ["No Power", "12V", "24V"], "default": "No Power" },
        "lockType": { "values": ["Fail-safe", "Fail-secure"], "default": "Fail-secure" },
        "lockKick": { "values": ["Off", "On"], "default": "Off" },
        "lockRelease": { "values": ["Always", "Timed", "Never"], "default": "Timed", "common": true },
        "lockReleaseTime": { "range": { "min": 0.0, "max": 10.0 }, "unit": "s", "default": 5.0 },
        "lockAngle": { "range": { "min": 0.0, "max": 360.0 }, "unit": "deg", "default": 45 }
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_forms_match_typed_snapshot() {
        let from_str: ConfigSnapshot = serde_json::from_str(SAMPLE_JSON).unwrap();
        let from_value: ConfigSnapshot = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(from_str, sample_snapshot());
        assert_eq!(from_value, sample_snapshot());
    }

    #[test]
    fn sample_satisfies_shape_invariants() {
        assert!(sample_snapshot().check().is_ok());
        assert!(snapshot_with_common(false, true).check().is_ok());
    }
}
