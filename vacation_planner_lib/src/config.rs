use crate::destination::Coordinate;

const DEFAULT_TILE_URL: &str = "https://api.maptiler.com/maps/outdoor-v2/256/{z}/{x}/{y}.png?key={key}";

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Tile URL with `{z}`, `{x}`, `{y}` for the map and `{key}` for the token.
    pub tile_url_template: String,
    pub access_token: Option<String>,
    pub center: Coordinate,
    pub zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url_template: DEFAULT_TILE_URL.into(),
            access_token: None,
            center: Coordinate::new(-98.5795, 39.8283),
            zoom: 3.5,
            max_zoom: 19.,
        }
    }
}

impl MapConfig {
    /// Blank or missing tokens count as absent.
    pub fn with_access_token(mut self, token: Option<&str>) -> Self {
        self.access_token = token.map(str::trim).filter(|t| !t.is_empty()).map(str::to_owned);
        self
    }

    /// `None` when there is no token, the map then runs without tiles.
    pub fn tile_url(&self) -> Option<String> {
        let token = self.access_token.as_deref()?;
        Some(self.tile_url_template.replace("{key}", token))
    }
}

#[test]
fn test_tile_url_requires_token() {
    let config = MapConfig::default().with_access_token(Some("  "));
    assert_eq!(config.tile_url(), None);

    let config = MapConfig::default().with_access_token(Some("abc"));
    assert_eq!(
        config.tile_url().as_deref(),
        Some("https://api.maptiler.com/maps/outdoor-v2/256/{z}/{x}/{y}.png?key=abc")
    );
}
