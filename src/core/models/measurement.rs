//! Anthropometric and bioimpedance measurements
//!
//! [`MeasurementField`] is the single source of field metadata (wire key,
//! label, unit, group). Forms, tables and reports all iterate it instead of
//! addressing measurements by string.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit suffix shown next to a measurement value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Kilograms
    Kilograms,
    /// Metres
    Meters,
    /// Centimetres
    Centimeters,
    /// Percentage
    Percent,
    /// Years
    Years,
    /// Kilocalories per day
    KcalPerDay,
    /// Dimensionless index
    None,
}

impl Unit {
    /// Suffix text, empty for [`Unit::None`]
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Meters => "m",
            Self::Centimeters => "cm",
            Self::Percent => "%",
            Self::Years => "anos",
            Self::KcalPerDay => "kcal/dia",
            Self::None => "",
        }
    }
}

/// Subsection a field belongs to in the student detail sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    /// Weight and height
    BasicInfo,
    /// Circumferences
    Anthropometry,
    /// Body composition and metabolism
    Bioimpedance,
}

impl FieldGroup {
    /// All groups in display order
    pub const ALL: [Self; 3] = [Self::BasicInfo, Self::Anthropometry, Self::Bioimpedance];

    /// Section title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Informações Básicas",
            Self::Anthropometry => "Antropometria",
            Self::Bioimpedance => "Bioimpedância e Metabolismo",
        }
    }

    /// Fields of this group in display order
    #[must_use]
    pub const fn fields(self) -> &'static [MeasurementField] {
        use MeasurementField as F;
        match self {
            Self::BasicInfo => &[F::Weight, F::Height],
            Self::Anthropometry => &[
                F::LeftArm,
                F::RightArm,
                F::LeftThigh,
                F::RightThigh,
                F::Abdomen,
                F::LeftCalf,
                F::RightCalf,
                F::Waist,
                F::Hip,
                F::Bust,
            ],
            Self::Bioimpedance => &[
                F::BodyFat,
                F::VisceralFat,
                F::Muscle,
                F::BodyMassIndex,
                F::BodyAge,
                F::BasalKcal,
            ],
        }
    }
}

/// A tracked measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeasurementField {
    /// Body weight
    Weight,
    /// Height
    Height,
    /// Body-mass index
    BodyMassIndex,
    /// Body-fat percentage
    BodyFat,
    /// Visceral fat rating
    VisceralFat,
    /// Muscle percentage
    Muscle,
    /// Metabolic body age
    BodyAge,
    /// Basal calorie estimate
    BasalKcal,
    /// Right arm circumference
    RightArm,
    /// Left arm circumference
    LeftArm,
    /// Right thigh circumference
    RightThigh,
    /// Left thigh circumference
    LeftThigh,
    /// Right calf circumference
    RightCalf,
    /// Left calf circumference
    LeftCalf,
    /// Abdomen circumference
    Abdomen,
    /// Waist circumference
    Waist,
    /// Hip circumference
    Hip,
    /// Bust circumference
    Bust,
}

impl MeasurementField {
    /// Every field, in evolution-report order
    pub const ALL: [Self; 18] = [
        Self::Weight,
        Self::Height,
        Self::BodyMassIndex,
        Self::BodyFat,
        Self::VisceralFat,
        Self::Muscle,
        Self::BodyAge,
        Self::BasalKcal,
        Self::RightArm,
        Self::LeftArm,
        Self::RightThigh,
        Self::LeftThigh,
        Self::RightCalf,
        Self::LeftCalf,
        Self::Abdomen,
        Self::Waist,
        Self::Hip,
        Self::Bust,
    ];

    /// Column subset used by the on-screen history table
    pub const HISTORY_TABLE: [Self; 9] = [
        Self::Weight,
        Self::Height,
        Self::RightArm,
        Self::LeftArm,
        Self::Abdomen,
        Self::Waist,
        Self::Hip,
        Self::BodyFat,
        Self::Muscle,
    ];

    /// JSON key used by the store
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Weight => "peso",
            Self::Height => "altura",
            Self::BodyMassIndex => "indiceMassa",
            Self::BodyFat => "gorduraCorporal",
            Self::VisceralFat => "gorduraVisceral",
            Self::Muscle => "musculatura",
            Self::BodyAge => "idadeCorporal",
            Self::BasalKcal => "kcal",
            Self::RightArm => "bracoDireito",
            Self::LeftArm => "bracoEsquerdo",
            Self::RightThigh => "cochaDireita",
            Self::LeftThigh => "cochaEsquerda",
            Self::RightCalf => "panturrilhaDireita",
            Self::LeftCalf => "panturrilhaEsquerda",
            Self::Abdomen => "abdomen",
            Self::Waist => "cintura",
            Self::Hip => "quadril",
            Self::Bust => "busto",
        }
    }

    /// Human-readable label without unit
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weight => "Peso",
            Self::Height => "Altura",
            Self::BodyMassIndex => "IMC",
            Self::BodyFat => "Gordura Corporal",
            Self::VisceralFat => "Gordura Visceral",
            Self::Muscle => "Musculatura",
            Self::BodyAge => "Idade Corporal",
            Self::BasalKcal => "Kcal Basal",
            Self::RightArm => "Braço Direito",
            Self::LeftArm => "Braço Esquerdo",
            Self::RightThigh => "Coxa Direita",
            Self::LeftThigh => "Coxa Esquerda",
            Self::RightCalf => "Panturrilha Direita",
            Self::LeftCalf => "Panturrilha Esquerda",
            Self::Abdomen => "Abdômen",
            Self::Waist => "Cintura",
            Self::Hip => "Quadril",
            Self::Bust => "Busto",
        }
    }

    /// Unit suffix applied at render time
    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Self::Weight => Unit::Kilograms,
            Self::Height => Unit::Meters,
            Self::BodyFat | Self::Muscle => Unit::Percent,
            Self::BodyAge => Unit::Years,
            Self::BasalKcal => Unit::KcalPerDay,
            Self::BodyMassIndex | Self::VisceralFat => Unit::None,
            Self::RightArm
            | Self::LeftArm
            | Self::RightThigh
            | Self::LeftThigh
            | Self::RightCalf
            | Self::LeftCalf
            | Self::Abdomen
            | Self::Waist
            | Self::Hip
            | Self::Bust => Unit::Centimeters,
        }
    }

    /// Label with unit, e.g. `Peso (kg)`; unitless fields keep the bare label
    #[must_use]
    pub fn label_with_unit(self) -> String {
        match self.unit().suffix() {
            "" => self.label().to_string(),
            suffix => format!("{} ({suffix})", self.label()),
        }
    }

    /// Value with unit, e.g. `80.5 kg`
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        match self.unit().suffix() {
            "" => format_number(value),
            suffix => format!("{} {suffix}", format_number(value)),
        }
    }
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MeasurementField {
    type Err = String;

    /// Accepts the wire key (`peso`, case-insensitive) or the Rust-side
    /// snake-case name (`weight`, `body_fat`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(wanted) || f.snake_name() == wanted)
            .ok_or_else(|| format!("Unknown measurement field: '{wanted}'"))
    }
}

impl MeasurementField {
    const fn snake_name(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Height => "height",
            Self::BodyMassIndex => "body_mass_index",
            Self::BodyFat => "body_fat",
            Self::VisceralFat => "visceral_fat",
            Self::Muscle => "muscle",
            Self::BodyAge => "body_age",
            Self::BasalKcal => "basal_kcal",
            Self::RightArm => "right_arm",
            Self::LeftArm => "left_arm",
            Self::RightThigh => "right_thigh",
            Self::LeftThigh => "left_thigh",
            Self::RightCalf => "right_calf",
            Self::LeftCalf => "left_calf",
            Self::Abdomen => "abdomen",
            Self::Waist => "waist",
            Self::Hip => "hip",
            Self::Bust => "bust",
        }
    }
}

/// Shortest round-trip rendering: `80`, `78.5`, `1.75`
#[must_use]
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Parse user or wire input, accepting a comma decimal separator
///
/// Blank input, garbage and non-finite values yield `None`.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Deserialize a number that may arrive as a JSON number, numeric string or null
///
/// # Errors
/// Only fails when the value is neither a number, a string nor null
pub fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) if n.is_finite() => Some(n),
        Some(Raw::Text(s)) => parse_decimal(&s),
        _ => None,
    })
}

macro_rules! measurements_struct {
    ($($ident:ident => $variant:ident, $key:literal;)*) => {
        /// Fixed record of every measurement; absent readings are `None`
        #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
        pub struct Measurements {
            $(
                #[doc = concat!("`", $key, "`")]
                #[serde(
                    rename = $key,
                    default,
                    deserialize_with = "lenient_number",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $ident: Option<f64>,
            )*
        }

        impl Measurements {
            /// Value recorded for `field`
            #[must_use]
            pub const fn get(&self, field: MeasurementField) -> Option<f64> {
                match field {
                    $(MeasurementField::$variant => self.$ident,)*
                }
            }

            /// Record (or clear) the value for `field`
            pub fn set(&mut self, field: MeasurementField, value: Option<f64>) {
                match field {
                    $(MeasurementField::$variant => self.$ident = value,)*
                }
            }
        }
    };
}

measurements_struct! {
    weight => Weight, "peso";
    height => Height, "altura";
    body_mass_index => BodyMassIndex, "indiceMassa";
    body_fat => BodyFat, "gorduraCorporal";
    visceral_fat => VisceralFat, "gorduraVisceral";
    muscle => Muscle, "musculatura";
    body_age => BodyAge, "idadeCorporal";
    basal_kcal => BasalKcal, "kcal";
    right_arm => RightArm, "bracoDireito";
    left_arm => LeftArm, "bracoEsquerdo";
    right_thigh => RightThigh, "cochaDireita";
    left_thigh => LeftThigh, "cochaEsquerda";
    right_calf => RightCalf, "panturrilhaDireita";
    left_calf => LeftCalf, "panturrilhaEsquerda";
    abdomen => Abdomen, "abdomen";
    waist => Waist, "cintura";
    hip => Hip, "quadril";
    bust => Bust, "busto";
}

impl Measurements {
    /// Value for `field`, or `0` when absent (list views only)
    #[must_use]
    pub fn value_or_zero(&self, field: MeasurementField) -> f64 {
        self.get(field).unwrap_or(0.0)
    }

    /// Fields that carry a value, in report order
    pub fn present(&self) -> impl Iterator<Item = (MeasurementField, f64)> + '_ {
        MeasurementField::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|v| (f, v)))
    }

    /// True if no field carries a value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}
