//! Fake value generation for catalog datatypes.
//!
//! `ValueGenerator` turns a column's declared datatype (plus its element type
//! and resolved generator hint) into one SQL literal. All randomness comes
//! from the generator's RNG, so a fixed seed reproduces the same literals.

mod datatype;

pub use datatype::Datatype;

use crate::error::{Error, Result};
use crate::schema::{GeneratorHint, Table};
use ahash::AHashMap;
use chrono::{Days, NaiveDate};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};
use tracing::debug;

/// PostgreSQL limit on digits before the decimal point of a numeric
const NUMERIC_MAX_PRECISION: usize = 131_072;
/// PostgreSQL limit on digits after the decimal point of a numeric
const NUMERIC_MAX_SCALE: usize = 16_383;

/// Guaranteed significant digits of `real`
const REAL_DIGITS: usize = 6;
/// Guaranteed significant digits of `double precision`
const DOUBLE_DIGITS: usize = 15;
/// Generated floats fall in `-FLOAT_BOUND..FLOAT_BOUND`
const FLOAT_BOUND: f64 = 1_000_000.0;

/// Length of generated `bit` values
const BIT_LENGTH: usize = 8;

/// Dates are drawn from 1970-01-01 up to the end of 2030
const DATE_SPAN_DAYS: u64 = 22_281;

/// Fields in a generated JSON object
const JSON_MAX_FIELDS: usize = 5;

/// Wrap a string in single quotes, doubling any embedded quote
pub fn quote_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Generates SQL literals from an owned RNG
pub struct ValueGenerator<R: Rng> {
    rng: R,
}

impl ValueGenerator<StdRng> {
    /// Create a generator whose output is fully determined by `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ValueGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate one literal for a column.
    ///
    /// `element_type` is the catalog's `udt_name`, used to resolve array
    /// elements. `hints` maps column names to their resolved generator.
    pub fn generate_value(
        &mut self,
        datatype: &str,
        element_type: &str,
        column_name: &str,
        hints: &AHashMap<String, GeneratorHint>,
    ) -> Result<String> {
        let dt = Datatype::from_sql_type(datatype).ok_or_else(|| Error::UnsupportedDatatype {
            datatype: datatype.to_string(),
            element_type: element_type.to_string(),
        })?;
        self.generate(dt, element_type, column_name, hints)
    }

    fn generate(
        &mut self,
        dt: Datatype,
        element_type: &str,
        column_name: &str,
        hints: &AHashMap<String, GeneratorHint>,
    ) -> Result<String> {
        let value = match dt {
            Datatype::Array => {
                let element = Datatype::from_element_type(element_type)?;
                let value = self.generate(element, "", column_name, hints)?;
                format!("ARRAY[{}]", value)
            }
            Datatype::SmallInt => self.rng.random::<i16>().to_string(),
            Datatype::Integer => self.rng.random::<i32>().to_string(),
            Datatype::BigInt => self.rng.random::<i64>().to_string(),
            Datatype::SmallSerial => self.rng.random_range(1..=i16::MAX).to_string(),
            Datatype::Serial => self.rng.random_range(1..=i32::MAX).to_string(),
            Datatype::BigSerial => self.rng.random_range(1..=i64::MAX).to_string(),
            Datatype::Boolean => {
                if self.rng.random_bool(0.5) {
                    "true".to_string()
                } else {
                    "false".to_string()
                }
            }
            Datatype::Numeric => self.numeric(),
            Datatype::Real => {
                let value = self.rng.random_range(-FLOAT_BOUND..FLOAT_BOUND) as f32;
                format_significant(f64::from(value), REAL_DIGITS)
            }
            Datatype::Double => {
                let value = self.rng.random_range(-FLOAT_BOUND..FLOAT_BOUND);
                format_significant(value, DOUBLE_DIGITS)
            }
            Datatype::Json => quote_literal(&self.json_object()?),
            Datatype::Text => {
                let text = match hints.get(column_name) {
                    Some(hint) => self.hinted_text(*hint),
                    None => Sentence(3..10).fake_with_rng(&mut self.rng),
                };
                quote_literal(&text)
            }
            Datatype::Timestamp => quote_literal(&self.date()),
            Datatype::Bit => {
                let bits: String = (0..BIT_LENGTH)
                    .map(|_| if self.rng.random_bool(0.5) { '1' } else { '0' })
                    .collect();
                format!("B'{}'", bits)
            }
            Datatype::Uuid => quote_literal(&self.uuid()),
        };
        Ok(value)
    }

    fn hinted_text(&mut self, hint: GeneratorHint) -> String {
        match hint {
            GeneratorHint::FirstName => FirstName().fake_with_rng(&mut self.rng),
            GeneratorHint::LastName => LastName().fake_with_rng(&mut self.rng),
            GeneratorHint::Name => Name().fake_with_rng(&mut self.rng),
            GeneratorHint::Company => CompanyName().fake_with_rng(&mut self.rng),
            GeneratorHint::Uuid => self.uuid(),
        }
    }

    /// Random fixed-point literal. Digit counts are bounded by the numeric
    /// type itself, not by any column's declared precision and scale.
    fn numeric(&mut self) -> String {
        let before = self.rng.random_range(1..=NUMERIC_MAX_PRECISION);
        let after = self.rng.random_range(1..=NUMERIC_MAX_SCALE);

        let mut out = String::with_capacity(before + after + 1);
        for _ in 0..before {
            out.push(char::from(b'0' + self.rng.random_range(0..10u8)));
        }
        out.push('.');
        for _ in 0..after {
            out.push(char::from(b'0' + self.rng.random_range(0..10u8)));
        }
        out
    }

    fn json_object(&mut self) -> Result<String> {
        let fields = self.rng.random_range(1..=JSON_MAX_FIELDS);
        let mut object = Map::new();
        for _ in 0..fields {
            let key: String = Word().fake_with_rng(&mut self.rng);
            let value = match self.rng.random_range(0..5u8) {
                0 => Value::String(Name().fake_with_rng(&mut self.rng)),
                1 => Value::from(self.rng.random_range(-1000..=1000i64)),
                2 => Value::Bool(self.rng.random_bool(0.5)),
                3 => Value::from((self.rng.random_range(0.0..1000.0f64) * 100.0).round() / 100.0),
                _ => Value::String(Sentence(2..6).fake_with_rng(&mut self.rng)),
            };
            object.insert(key, value);
        }
        Ok(serde_json::to_string(&Value::Object(object))?)
    }

    /// Date string (ISO 8601)
    fn date(&mut self) -> String {
        let offset = self.rng.random_range(0..DATE_SPAN_DAYS);
        let date = NaiveDate::default() + Days::new(offset);
        date.format("%Y-%m-%d").to_string()
    }

    fn uuid(&mut self) -> String {
        format!(
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            self.rng.random::<u32>(),
            self.rng.random::<u16>(),
            (self.rng.random::<u16>() & 0x0FFF) | 0x4000, // Version 4
            (self.rng.random::<u16>() & 0x3FFF) | 0x8000, // Variant
            self.rng.random::<u64>() & 0xFFFF_FFFF_FFFF_u64
        )
    }
}

/// Format a float with exactly `digits` significant digits, without exponent
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", digits.saturating_sub(1), 0.0);
    }
    let decimals_for = |v: f64| {
        let magnitude = v.abs().log10().floor() as i64;
        (digits as i64 - 1 - magnitude).max(0) as usize
    };

    let decimals = decimals_for(value);
    let formatted = format!("{:.*}", decimals, value);

    // Rounding can carry into a new leading digit (9.9999996 -> 10.00000)
    match formatted.parse::<f64>() {
        Ok(rounded) if rounded != 0.0 && decimals_for(rounded) < decimals => {
            format!("{:.*}", decimals_for(rounded), value)
        }
        _ => formatted,
    }
}

impl Table {
    /// Append `count` generated rows.
    ///
    /// Identity columns get no literal. Repeated calls accumulate rows. If a
    /// value cannot be generated, the rows added by this call are discarded.
    pub fn create_data<R: Rng>(
        &mut self,
        count: usize,
        generator: &mut ValueGenerator<R>,
    ) -> Result<()> {
        self.create_data_with_progress(count, generator, |_| {})
    }

    /// Like [`Table::create_data`], calling `progress` with the number of rows
    /// generated so far after each row.
    pub fn create_data_with_progress<R, F>(
        &mut self,
        count: usize,
        generator: &mut ValueGenerator<R>,
        mut progress: F,
    ) -> Result<()>
    where
        R: Rng,
        F: FnMut(u64),
    {
        let start = self.rows.len();
        self.rows.reserve(count);

        for i in 0..count {
            match self.generate_row(generator) {
                Ok(row) => self.rows.push(row),
                Err(e) => {
                    self.rows.truncate(start);
                    return Err(e);
                }
            }
            progress(i as u64 + 1);
        }

        debug!(table = %self.name, rows = count, "generated rows");
        Ok(())
    }

    fn generate_row<R: Rng>(&self, generator: &mut ValueGenerator<R>) -> Result<Vec<String>> {
        self.insert_columns()
            .map(|col| generator.generate_value(&col.data_type, &col.udt_name, &col.name, &self.hints))
            .collect()
    }
}
