// Interactive map model
//
// Loads the geographic boundary document once per session and answers region
// identity, active-selection, and hover queries. Geometry stays opaque; the
// projection and drawing belong to the renderer.

use crate::Result;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// GeoJSON-like boundary document
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryDocument {
    pub features: Vec<RegionFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionFeature {
    /// Feature id; some sources emit numbers, so both forms are accepted
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: RegionProperties,
    /// Opaque geometry, handed verbatim to the renderer
    #[serde(default)]
    pub geometry: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionProperties {
    #[serde(rename = "DPTO", default, deserialize_with = "string_or_number")]
    pub dpto: Option<String>,
    #[serde(rename = "NOMBRE_DPT", default)]
    pub nombre_dpt: Option<String>,
}

impl RegionFeature {
    /// Region identity: feature id, falling back to the department code
    /// property, falling back to the name.
    pub fn region_id(&self) -> &str {
        self.id
            .as_deref()
            .or(self.properties.dpto.as_deref())
            .or(self.properties.nombre_dpt.as_deref())
            .unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.properties.nombre_dpt.as_deref().unwrap_or("")
    }

    /// A region is active if its id or its name equals the selected
    /// department identifier; features without a code only carry a name.
    pub fn is_active(&self, selected: Option<&str>) -> bool {
        match selected {
            None => false,
            Some(sel) => sel == self.region_id() || (!self.name().is_empty() && sel == self.name()),
        }
    }
}

impl BoundaryDocument {
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(target: "map", path = %path.display(), "Loading boundary document");
        let raw = std::fs::read_to_string(path)?;
        let doc: BoundaryDocument = serde_json::from_str(&raw)?;
        Ok(doc)
    }
}

static BOUNDARIES: OnceLock<BoundaryDocument> = OnceLock::new();

/// Load the boundary document, cached for the session.
pub fn load_boundaries(path: &Path) -> Result<&'static BoundaryDocument> {
    if let Some(doc) = BOUNDARIES.get() {
        return Ok(doc);
    }
    let doc = BoundaryDocument::from_path(path)?;
    Ok(BOUNDARIES.get_or_init(|| doc))
}

/// Transient view state of the map: which region the pointer is over.
/// Hover only drives a highlight and a name tooltip; it is never persisted.
#[derive(Debug, Clone, Default)]
pub struct MapView {
    hovered: Option<String>,
}

impl MapView {
    pub fn hover(&mut self, region_id: &str) {
        self.hovered = Some(region_id.to_string());
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn is_hovered(&self, feature: &RegionFeature) -> bool {
        self.hovered.as_deref() == Some(feature.region_id())
    }

    /// Tooltip text: name of the hovered region, if any
    pub fn tooltip<'a>(&self, doc: &'a BoundaryDocument) -> Option<&'a str> {
        let hovered = self.hovered.as_deref()?;
        doc.features
            .iter()
            .find(|f| f.region_id() == hovered)
            .map(|f| f.name())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
