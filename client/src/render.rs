//! View models for the map, chart and climate table
//!
//! Everything here is pure. The models serialize to what a Leaflet map and
//! a Chart.js line chart expect, and the table is an HTML fragment with all
//! user-supplied text escaped.

use serde::Serialize;
use shared::{MarkerTier, ParamId, SavedLocation, Season, BUCKET_LABELS};

/// Zoom used when centring on a saved location
pub const LOCATION_ZOOM: u8 = 5;

/// Zoom used for the empty world view
pub const WORLD_ZOOM: u8 = 2;

/// NDVI above which the bloom peak is reported as summer
const SUMMER_PEAK_NDVI: f64 = 0.6;

/// Something the front-end should draw
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Render {
    Map(MapView),
    Chart(ChartSpec),
    Table { html: String },
    Csv { file_name: String, content: String },
}

// ============================================================================
// Map
// ============================================================================

/// Circle marker for one saved location
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    /// Position in the saved list, used by the delete button
    pub index: usize,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub latest_ndvi: f64,
    pub tier: MarkerTier,
    pub fill_color: &'static str,
    pub popup_html: String,
}

impl Marker {
    pub fn for_location(index: usize, location: &SavedLocation) -> Self {
        let latest = location.latest_ndvi();
        let tier = location.tier();
        Self {
            index,
            name: location.name.clone(),
            lat: location.lat,
            lon: location.lon,
            latest_ndvi: latest,
            tier,
            fill_color: tier.color(),
            popup_html: popup_html(index, &location.name, latest),
        }
    }
}

/// Bloom-peak note shown in the marker popup
pub fn bloom_peak(latest_ndvi: f64) -> &'static str {
    if latest_ndvi > SUMMER_PEAK_NDVI {
        "Summer (NDVI >0.6)"
    } else {
        "Spring"
    }
}

fn popup_html(index: usize, name: &str, latest_ndvi: f64) -> String {
    format!(
        "<b>{}</b><br>NDVI: {:.2}<br><em>Bloom peak: {}</em><br>\
         <button class=\"delete-btn\" data-index=\"{}\">Delete</button>",
        escape_html(name),
        latest_ndvi,
        bloom_peak(latest_ndvi),
        index
    )
}

/// Map state after a refresh
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// Centre on the most recent location, or show the whole world
    pub fn for_locations(locations: &[SavedLocation]) -> Self {
        let markers = locations
            .iter()
            .enumerate()
            .map(|(index, location)| Marker::for_location(index, location))
            .collect();

        match locations.last() {
            Some(last) => Self {
                center: [last.lat, last.lon],
                zoom: LOCATION_ZOOM,
                markers,
            },
            None => Self {
                center: [0.0, 0.0],
                zoom: WORLD_ZOOM,
                markers,
            },
        }
    }
}

// ============================================================================
// Chart
// ============================================================================

/// Chart.js line chart configuration
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub scales: ChartScales,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartScales {
    pub x: ChartAxis,
    pub y: ChartAxis,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub title: AxisTitle,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: &'static str,
}

impl ChartSpec {
    /// NDVI line chart for one location, y axis fixed to 0..1
    pub fn ndvi(location: &SavedLocation) -> Self {
        Self {
            kind: "line",
            data: ChartData {
                labels: BUCKET_LABELS.to_vec(),
                datasets: vec![ChartDataset {
                    label: format!("NDVI ({})", location.name),
                    data: location.ndvi.values().to_vec(),
                    border_color: "#333",
                    background_color: "rgba(51, 51, 51, 0.1)",
                    fill: true,
                    tension: 0.3,
                }],
            },
            options: ChartOptions {
                responsive: true,
                scales: ChartScales {
                    x: ChartAxis {
                        min: None,
                        max: None,
                        title: AxisTitle {
                            display: true,
                            text: "Date",
                        },
                    },
                    y: ChartAxis {
                        min: Some(0.0),
                        max: Some(1.0),
                        title: AxisTitle {
                            display: true,
                            text: "NDVI",
                        },
                    },
                },
            },
        }
    }
}

// ============================================================================
// Table
// ============================================================================

/// Seasonal climate table, one row per parameter, values to 2 decimals
pub fn climate_table(place: &str, season: Season, averages: &[(ParamId, f64)]) -> String {
    let mut html = format!(
        "<h3>Climate for {} in {}</h3>\n<table id=\"climateTable\">\n<tr><th>Parameter</th><th>Value</th></tr>\n",
        escape_html(place),
        season
    );
    for (param, value) in averages {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td></tr>\n",
            escape_html(param.label()),
            value
        ));
    }
    html.push_str("</table>");
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Coordinate, MonthlySeries};

    fn location(name: &str, latest: f64) -> SavedLocation {
        let mut values = [0.5; 10];
        values[9] = latest;
        SavedLocation::new(
            name,
            Coordinate::new(48.85, 2.35).unwrap(),
            MonthlySeries::new(values),
        )
    }

    #[test]
    fn test_marker_tiers_follow_latest_bucket() {
        assert_eq!(Marker::for_location(0, &location("a", 0.29)).fill_color, "red");
        assert_eq!(Marker::for_location(0, &location("a", 0.3)).fill_color, "yellow");
        assert_eq!(Marker::for_location(0, &location("a", 0.6)).fill_color, "green");
    }

    #[test]
    fn test_popup_content() {
        let marker = Marker::for_location(3, &location("Paris", 0.61));
        assert!(marker.popup_html.contains("<b>Paris</b>"));
        assert!(marker.popup_html.contains("NDVI: 0.61"));
        assert!(marker.popup_html.contains("Summer (NDVI >0.6)"));
        assert!(marker.popup_html.contains("data-index=\"3\""));

        // Exactly 0.6 is green but still a spring peak
        let marker = Marker::for_location(0, &location("Paris", 0.6));
        assert!(marker.popup_html.contains("Bloom peak: Spring"));
    }

    #[test]
    fn test_popup_escapes_name() {
        let marker = Marker::for_location(0, &location("<script>", 0.1));
        assert!(marker.popup_html.contains("&lt;script&gt;"));
        assert!(!marker.popup_html.contains("<script>"));
    }

    #[test]
    fn test_map_view_centre() {
        let empty = MapView::for_locations(&[]);
        assert_eq!(empty.center, [0.0, 0.0]);
        assert_eq!(empty.zoom, WORLD_ZOOM);

        let view = MapView::for_locations(&[location("a", 0.1), location("b", 0.9)]);
        assert_eq!(view.center, [48.85, 2.35]);
        assert_eq!(view.zoom, LOCATION_ZOOM);
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[1].index, 1);
    }

    #[test]
    fn test_chart_json_shape() {
        let chart = ChartSpec::ndvi(&location("Kyiv", 0.2));
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["labels"][0], "Jan");
        assert_eq!(json["data"]["labels"][9], "Oct");
        assert_eq!(json["data"]["datasets"][0]["label"], "NDVI (Kyiv)");
        assert_eq!(json["data"]["datasets"][0]["borderColor"], "#333");
        assert_eq!(json["options"]["scales"]["y"]["max"], 1.0);
        assert!(json["options"]["scales"]["x"].get("min").is_none());
    }

    #[test]
    fn test_climate_table() {
        let html = climate_table(
            "Cape Town",
            Season::Summer,
            &[(ParamId::T2m, 21.456), (ParamId::Rh2m, 60.0)],
        );
        assert!(html.starts_with("<h3>Climate for Cape Town in Summer</h3>"));
        assert!(html.contains("<table id=\"climateTable\">"));
        assert!(html.contains("<tr><td>Average Temperature (°C)</td><td>21.46</td></tr>"));
        assert!(html.contains("<tr><td>Average Humidity (%)</td><td>60.00</td></tr>"));
        assert!(html.ends_with("</table>"));
    }
}
