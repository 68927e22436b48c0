use serde::{Deserialize, Deserializer, Serialize};

use crate::PlannerError;

/// Decimal places kept when a coordinate is captured from the map (~11 m).
pub const COORDINATE_PRECISION: i32 = 4;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Wraps the longitude into [-180, 180], clamps the latitude to [-90, 90]
    /// and rounds both to `COORDINATE_PRECISION` decimal places.
    pub fn captured(lng: f64, lat: f64) -> Self {
        Self {
            lng: round_to_precision(wrap_longitude(lng)),
            lat: round_to_precision(lat.clamp(-90., 90.)),
        }
    }
}

/// Rounds the exact decimal value of `value`, halves away from zero.
pub fn round_to_precision(value: f64) -> f64 {
    // Only multiples of 1/32 can sit exactly on a half, and scaling those is exact
    if (value * 32.).fract() == 0. {
        let factor = 10f64.powi(COORDINATE_PRECISION);
        return (value * factor).round() / factor;
    }
    format!("{:.1$}", value, COORDINATE_PRECISION as usize).parse().unwrap_or(value)
}

fn wrap_longitude(lng: f64) -> f64 {
    if (-180. ..=180.).contains(&lng) {
        return lng;
    }
    let wrapped = (lng + 180.).rem_euclid(360.) - 180.;
    // rem_euclid maps 180 to -180, keep the eastern edge
    if wrapped == -180. && lng > 0. { 180. } else { wrapped }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Destination {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub date: String,
    pub lng: f64,
    pub lat: f64,
}

impl Destination {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }
}

/// Everything a destination needs except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDestination {
    pub name: String,
    pub date: String,
    pub lng: f64,
    pub lat: f64,
}

impl NewDestination {
    pub fn at(coordinate: Coordinate, name: String, date: String) -> Self {
        Self {
            name,
            date,
            lng: coordinate.lng,
            lat: coordinate.lat,
        }
    }

    pub(crate) fn with_id(self, id: String) -> Destination {
        Destination {
            id,
            name: self.name,
            date: self.date,
            lng: self.lng,
            lat: self.lat,
        }
    }
}

/// Raw form input, checked before anything reaches the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestinationDraft {
    pub name: String,
    pub date: String,
}

impl DestinationDraft {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
        }
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.name.trim().is_empty() {
            return Err(PlannerError::EmptyName);
        }
        if self.date.trim().is_empty() {
            return Err(PlannerError::EmptyDate);
        }
        Ok(())
    }

    pub fn into_new_destination(self, coordinate: Coordinate) -> Result<NewDestination, PlannerError> {
        self.validate()?;
        Ok(NewDestination::at(coordinate, self.name.trim().to_owned(), self.date.trim().to_owned()))
    }
}

// Older saves used numeric ids
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
        RawId::Float(id) => id.to_string(),
    })
}

#[test]
fn test_click_precision_is_preserved() {
    let coordinate = Coordinate::captured(2.3508, 48.8567);
    assert_eq!(coordinate.lng, 2.3508);
    assert_eq!(coordinate.lat, 48.8567);
}

#[test]
fn test_capture_rounds_and_wraps() {
    let coordinate = Coordinate::captured(12.345678, -33.98766);
    assert_eq!(coordinate, Coordinate::new(12.3457, -33.9877));

    let wrapped = Coordinate::captured(362.5, 95.);
    assert_eq!(wrapped, Coordinate::new(2.5, 90.));

    assert_eq!(Coordinate::captured(-190., 0.).lng, 170.);
    assert_eq!(Coordinate::captured(540., 0.).lng, 180.);
}

#[test]
fn test_rounding_uses_exact_decimal_value() {
    // 1.00005 is stored just below the half
    assert_eq!(round_to_precision(1.00005), 1.);
    assert_eq!(round_to_precision(0.03125), 0.0313);
    assert_eq!(round_to_precision(-0.03125), -0.0313);
    assert_eq!(round_to_precision(-77.04284), -77.0428);
    assert_eq!(round_to_precision(48.8567), 48.8567);
}

#[test]
fn test_draft_validation() {
    let coordinate = Coordinate::new(1., 2.);
    assert_eq!(DestinationDraft::new("", "2025-01-01").validate(), Err(PlannerError::EmptyName));
    assert_eq!(DestinationDraft::new("Oslo", "  ").validate(), Err(PlannerError::EmptyDate));

    let candidate = DestinationDraft::new(" Oslo ", "2025-01-01").into_new_destination(coordinate).unwrap();
    assert_eq!(candidate.name, "Oslo");
    assert_eq!(candidate.lng, 1.);
    assert_eq!(candidate.lat, 2.);
}

#[test]
fn test_numeric_ids_are_read_as_text() {
    let json = r#"[{"id":17,"name":"Lisbon","date":"2024-03-02","lng":-9.1393,"lat":38.7223,"note":"ignored"}]"#;
    let destinations: Vec<Destination> = serde_json::from_str(json).unwrap();
    assert_eq!(destinations[0].id, "17");
    assert_eq!(destinations[0].name, "Lisbon");
}
