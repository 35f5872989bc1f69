//! Map position carried in the `lat`/`lng` query parameters of a URL.

use shared::domain::Position;
use url::Url;

const LAT_PARAM: &str = "lat";
const LNG_PARAM: &str = "lng";

/// Coordinates read from a URL. Either side may be absent or unparsable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UrlPosition {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl UrlPosition {
    pub fn position(self) -> Option<Position> {
        Some(Position {
            lat: self.lat?,
            lng: self.lng?,
        })
    }
}

/// Repeated keys resolve to their first occurrence.
pub fn position_from_url(url: &Url) -> UrlPosition {
    UrlPosition {
        lat: first_coordinate(url, LAT_PARAM),
        lng: first_coordinate(url, LNG_PARAM),
    }
}

fn first_coordinate(url: &Url, name: &str) -> Option<f64> {
    url.query_pairs()
        .find(|(key, _)| &**key == name)
        .and_then(|(_, value)| value.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Returns `url` with `lat`/`lng` replaced by `position`; other parameters are kept in order.
pub fn with_position(url: &Url, position: Position) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| &**key != LAT_PARAM && &**key != LNG_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut updated = url.clone();
    updated
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(LAT_PARAM, &position.lat.to_string())
        .append_pair(LNG_PARAM, &position.lng.to_string());
    updated
}
