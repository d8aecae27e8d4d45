// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lock parameter model: the six parameter kinds and the per-door snapshot
//! that carries their current state.
//!
//! The serde layout is the wire contract shared with the remote source and
//! the persisted slots, so field names stay camelCase.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl Range {
    /// Create a range from its bounds.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", render_f64(self.min), render_f64(self.max))
    }
}

/// Parameter with an ordered list of permitted string values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumeratedParam {
    /// Permitted values in display order.
    pub values: Vec<String>,
    /// Currently selected value.
    pub default: String,
}

/// Enumerated parameter that may be shared by both doors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonEnumeratedParam {
    /// Permitted values in display order.
    pub values: Vec<String>,
    /// Currently selected value.
    pub default: String,
    /// When true, one value applies to both doors.
    #[serde(default)]
    pub common: bool,
}

/// Parameter constrained to a numeric range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangedParam {
    /// Permitted interval.
    pub range: Range,
    /// Unit label (display only).
    pub unit: String,
    /// Current value.
    pub default: f64,
}

/// Integral ranged parameter that may be shared by both doors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonIntRangedParam {
    /// Permitted interval.
    pub range: Range,
    /// Unit label (display only).
    pub unit: String,
    /// Current value. Integral floats such as `45.0` are accepted on decode.
    #[serde(deserialize_with = "integral")]
    pub default: i64,
    /// When true, one value applies to both doors.
    #[serde(default)]
    pub common: bool,
}

/// Full parameter state for one door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    /// Supply voltage selection.
    pub lock_voltage: EnumeratedParam,
    /// Lock type (fail-safe / fail-secure).
    pub lock_type: EnumeratedParam,
    /// Kick on release.
    pub lock_kick: EnumeratedParam,
    /// Release mode.
    pub lock_release: CommonEnumeratedParam,
    /// Release duration.
    pub lock_release_time: RangedParam,
    /// Lock angle.
    pub lock_angle: CommonIntRangedParam,
}

/// The six parameter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    /// `lockVoltage`
    LockVoltage,
    /// `lockType`
    LockType,
    /// `lockKick`
    LockKick,
    /// `lockRelease`
    LockRelease,
    /// `lockReleaseTime`
    LockReleaseTime,
    /// `lockAngle`
    LockAngle,
}

/// Value shape of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterShape {
    /// Pick one of a list of strings.
    Enumerated,
    /// Number within a range; `integral` values are truncated toward zero.
    Ranged {
        /// Whether stored values are whole numbers.
        integral: bool,
    },
}

impl Parameter {
    /// All parameters in display order.
    pub const ALL: [Self; 6] = [
        Self::LockVoltage,
        Self::LockType,
        Self::LockKick,
        Self::LockRelease,
        Self::LockReleaseTime,
        Self::LockAngle,
    ];

    /// Stable wire/lookup name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::LockVoltage => "lockVoltage",
            Self::LockType => "lockType",
            Self::LockKick => "lockKick",
            Self::LockRelease => "lockRelease",
            Self::LockReleaseTime => "lockReleaseTime",
            Self::LockAngle => "lockAngle",
        }
    }

    /// Resolve a wire name. Names are matched exactly.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Value shape of this parameter.
    pub const fn shape(self) -> ParameterShape {
        match self {
            Self::LockVoltage | Self::LockType | Self::LockKick | Self::LockRelease => {
                ParameterShape::Enumerated
            }
            Self::LockReleaseTime => ParameterShape::Ranged { integral: false },
            Self::LockAngle => ParameterShape::Ranged { integral: true },
        }
    }

    /// Whether this kind carries a `common` flag at all.
    pub const fn supports_common(self) -> bool {
        matches!(self, Self::LockRelease | Self::LockAngle)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw input for a ranged parameter was not a finite number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{parameter}: cannot parse {input:?} as a number")]
pub struct ParseFailure {
    /// Parameter being updated.
    pub parameter: Parameter,
    /// Rejected input.
    pub input: String,
}

/// A snapshot violates a shape invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{parameter}: {reason}")]
pub struct ShapeError {
    /// Offending parameter.
    pub parameter: Parameter,
    /// What is wrong with it.
    pub reason: &'static str,
}

impl ConfigSnapshot {
    /// Permitted values for an enumerated parameter; `None` for ranged ones.
    pub fn values(&self, parameter: Parameter) -> Option<&[String]> {
        match parameter {
            Parameter::LockVoltage => Some(&self.lock_voltage.values),
            Parameter::LockType => Some(&self.lock_type.values),
            Parameter::LockKick => Some(&self.lock_kick.values),
            Parameter::LockRelease => Some(&self.lock_release.values),
            Parameter::LockReleaseTime | Parameter::LockAngle => None,
        }
    }

    /// Range for a ranged parameter; `None` for enumerated ones.
    pub fn range(&self, parameter: Parameter) -> Option<Range> {
        match parameter {
            Parameter::LockReleaseTime => Some(self.lock_release_time.range),
            Parameter::LockAngle => Some(self.lock_angle.range),
            _ => None,
        }
    }

    /// Unit label for a ranged parameter.
    pub fn unit(&self, parameter: Parameter) -> Option<&str> {
        match parameter {
            Parameter::LockReleaseTime => Some(&self.lock_release_time.unit),
            Parameter::LockAngle => Some(&self.lock_angle.unit),
            _ => None,
        }
    }

    /// Stored `common` flag; always false for kinds that do not carry one.
    pub fn common(&self, parameter: Parameter) -> bool {
        match parameter {
            Parameter::LockRelease => self.lock_release.common,
            Parameter::LockAngle => self.lock_angle.common,
            _ => false,
        }
    }

    /// Current value rendered as a string.
    ///
    /// Fractional parameters keep a decimal part (`5.0`), integral ones do not.
    pub fn default_string(&self, parameter: Parameter) -> String {
        match parameter {
            Parameter::LockVoltage => self.lock_voltage.default.clone(),
            Parameter::LockType => self.lock_type.default.clone(),
            Parameter::LockKick => self.lock_kick.default.clone(),
            Parameter::LockRelease => self.lock_release.default.clone(),
            Parameter::LockReleaseTime => render_f64(self.lock_release_time.default),
            Parameter::LockAngle => self.lock_angle.default.to_string(),
        }
    }

    /// Replace the current value of `parameter` with `raw`.
    ///
    /// Enumerated values are stored verbatim. Ranged values are parsed as
    /// floating point; integral kinds are then truncated toward zero, so
    /// `"45.9"` stores `45`. On parse failure the snapshot is untouched.
    pub fn set_default(&mut self, parameter: Parameter, raw: &str) -> Result<(), ParseFailure> {
        match parameter {
            Parameter::LockVoltage => self.lock_voltage.default = raw.to_owned(),
            Parameter::LockType => self.lock_type.default = raw.to_owned(),
            Parameter::LockKick => self.lock_kick.default = raw.to_owned(),
            Parameter::LockRelease => self.lock_release.default = raw.to_owned(),
            Parameter::LockReleaseTime => {
                self.lock_release_time.default = parse_number(parameter, raw)?;
            }
            Parameter::LockAngle => {
                self.lock_angle.default = truncate(parse_number(parameter, raw)?);
            }
        }
        Ok(())
    }

    /// Check the shape invariants: non-empty choice lists, defaults drawn
    /// from their choices, `min <= max`, and ranged defaults inside range.
    #[allow(clippy::cast_precision_loss)]
    pub fn check(&self) -> Result<(), ShapeError> {
        for parameter in Parameter::ALL {
            if let Some(values) = self.values(parameter) {
                if values.is_empty() {
                    return Err(ShapeError {
                        parameter,
                        reason: "empty value list",
                    });
                }
                let current = self.default_string(parameter);
                if !values.iter().any(|v| *v == current) {
                    return Err(ShapeError {
                        parameter,
                        reason: "default is not one of the values",
                    });
                }
            }
        }
        let ranged = [
            (
                Parameter::LockReleaseTime,
                self.lock_release_time.range,
                self.lock_release_time.default,
            ),
            (
                Parameter::LockAngle,
                self.lock_angle.range,
                self.lock_angle.default as f64,
            ),
        ];
        for (parameter, range, value) in ranged {
            if range.min > range.max {
                return Err(ShapeError {
                    parameter,
                    reason: "range min exceeds max",
                });
            }
            if !range.contains(value) {
                return Err(ShapeError {
                    parameter,
                    reason: "default lies outside the range",
                });
            }
        }
        Ok(())
    }
}

fn parse_number(parameter: Parameter, raw: &str) -> Result<f64, ParseFailure> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseFailure {
            parameter,
            input: raw.to_owned(),
        })
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Whole number that may be written as `45` or `45.0` on the wire.
fn integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    match Number::deserialize(deserializer)? {
        Number::Int(value) => Ok(value),
        #[allow(clippy::cast_precision_loss)]
        Number::Float(value)
            if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 =>
        {
            Ok(truncate(value))
        }
        Number::Float(value) => Err(de::Error::invalid_value(
            de::Unexpected::Float(value),
            &"a whole number",
        )),
    }
}

/// Shortest round-trip rendering that always keeps a decimal point.
pub(crate) fn render_f64(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    const WIRE: &str = r#"{
        "lockVoltage": { "values": ["No Power", "12V", "24V"], "default": "No Power" },
        "lockType": { "values": ["Fail-safe", "Fail-secure"], "default": "Fail-secure" },
        "lockKick": { "values": ["Off", "On"], "default": "Off" },
        "lockRelease": { "values": ["Always", "Timed"], "default": "Timed", "common": true },
        "lockReleaseTime": { "range": { "min": 0, "max": 10 }, "unit": "s", "default": 5 },
        "lockAngle": { "range": { "min": 0, "max": 360 }, "unit": "deg", "default": 45 }
    }"#;

    fn snapshot() -> ConfigSnapshot {
        serde_json::from_str(WIRE).unwrap()
    }

    #[test]
    fn wire_document_decodes_with_missing_common_as_false() {
        let snap = snapshot();
        assert!(snap.lock_release.common);
        assert!(!snap.lock_angle.common);
        assert_eq!(snap.lock_release_time.range, Range::new(0.0, 10.0));
        assert_eq!(snap.lock_angle.default, 45);
    }

    #[test]
    fn integral_float_angle_decodes() {
        let wire = WIRE.replace(
            r#""unit": "deg", "default": 45"#,
            r#""unit": "deg", "default": 45.0"#,
        );
        let snap: ConfigSnapshot = serde_json::from_str(&wire).unwrap();
        assert_eq!(snap.lock_angle.default, 45);
    }

    #[test]
    fn fractional_angle_is_rejected_on_decode() {
        let wire = WIRE.replace(
            r#""unit": "deg", "default": 45"#,
            r#""unit": "deg", "default": 45.5"#,
        );
        let err = serde_json::from_str::<ConfigSnapshot>(&wire).unwrap_err();
        assert!(err.to_string().contains("whole number"), "{err}");
    }

    #[test]
    fn serialized_field_names_match_wire_contract() {
        let json = serde_json::to_value(snapshot()).unwrap();
        for parameter in Parameter::ALL {
            assert!(json.get(parameter.name()).is_some(), "{parameter}");
        }
        assert_eq!(json["lockAngle"]["common"], false);
    }

    #[test]
    fn from_name_is_exact() {
        assert_eq!(Parameter::from_name("lockAngle"), Some(Parameter::LockAngle));
        assert_eq!(Parameter::from_name("LockAngle"), None);
        assert_eq!(Parameter::from_name("lockAngle "), None);
        for parameter in Parameter::ALL {
            assert_eq!(Parameter::from_name(parameter.name()), Some(parameter));
        }
    }

    #[test]
    fn defaults_render_naturally() {
        let snap = snapshot();
        assert_eq!(snap.default_string(Parameter::LockReleaseTime), "5.0");
        assert_eq!(snap.default_string(Parameter::LockAngle), "45");
        assert_eq!(snap.default_string(Parameter::LockVoltage), "No Power");
    }

    #[test]
    fn integral_update_truncates_toward_zero() {
        let mut snap = snapshot();
        snap.set_default(Parameter::LockAngle, "45.9").unwrap();
        assert_eq!(snap.lock_angle.default, 45);
        snap.set_default(Parameter::LockAngle, "-3.7").unwrap();
        assert_eq!(snap.lock_angle.default, -3);
    }

    #[test]
    fn failed_parse_leaves_snapshot_untouched() {
        let mut snap = snapshot();
        let before = snap.clone();
        let err = snap
            .set_default(Parameter::LockReleaseTime, "abc")
            .unwrap_err();
        assert_eq!(err.parameter, Parameter::LockReleaseTime);
        assert!(snap.set_default(Parameter::LockAngle, "NaN").is_err());
        assert_eq!(snap, before);
    }

    #[test]
    fn check_rejects_default_outside_choices() {
        let mut snap = snapshot();
        assert!(snap.check().is_ok());
        snap.lock_kick.default = "Sideways".into();
        let err = snap.check().unwrap_err();
        assert_eq!(err.parameter, Parameter::LockKick);
    }

    #[test]
    fn check_rejects_inverted_range() {
        let mut snap = snapshot();
        snap.lock_release_time.range = Range::new(10.0, 0.0);
        assert_eq!(
            snap.check().unwrap_err().parameter,
            Parameter::LockReleaseTime
        );
    }

    #[test]
    fn shapes_split_enumerated_from_ranged() {
        assert_eq!(Parameter::LockKick.shape(), ParameterShape::Enumerated);
        assert_eq!(
            Parameter::LockAngle.shape(),
            ParameterShape::Ranged { integral: true }
        );
        let snap = snapshot();
        for parameter in Parameter::ALL {
            let enumerated = parameter.shape() == ParameterShape::Enumerated;
            assert_eq!(snap.values(parameter).is_some(), enumerated, "{parameter}");
            assert_eq!(snap.range(parameter).is_some(), !enumerated, "{parameter}");
        }
    }

    #[test]
    fn only_release_and_angle_support_common() {
        let common: Vec<_> = Parameter::ALL
            .into_iter()
            .filter(|p| p.supports_common())
            .collect();
        assert_eq!(common, vec![Parameter::LockRelease, Parameter::LockAngle]);
    }
}
