/// Unit tests for the boundary document model and hover/active state
use tablero_core::map::{BoundaryDocument, MapView};

fn sample_doc() -> BoundaryDocument {
    serde_json::from_str(
        r#"{
            "features": [
                {
                    "id": "05",
                    "properties": { "DPTO": "05", "NOMBRE_DPT": "ANTIOQUIA" },
                    "geometry": { "type": "Polygon", "coordinates": [] }
                },
                {
                    "properties": { "DPTO": 8, "NOMBRE_DPT": "ATLANTICO" },
                    "geometry": { "type": "Polygon", "coordinates": [] }
                },
                {
                    "properties": { "NOMBRE_DPT": "VICHADA" },
                    "geometry": { "type": "Polygon", "coordinates": [] }
                }
            ]
        }"#,
    )
    .unwrap()
}

mod identity {
    use super::*;

    #[test]
    fn id_falls_back_to_code_then_name() {
        let doc = sample_doc();
        assert_eq!(doc.features[0].region_id(), "05");
        // Numeric DPTO property is accepted and stringified
        assert_eq!(doc.features[1].region_id(), "8");
        // No id, no code: the name is the identity
        assert_eq!(doc.features[2].region_id(), "VICHADA");
    }

    #[test]
    fn active_matches_by_code_or_name() {
        let doc = sample_doc();
        let antioquia = &doc.features[0];
        assert!(antioquia.is_active(Some("05")));
        assert!(antioquia.is_active(Some("ANTIOQUIA")));
        assert!(!antioquia.is_active(Some("08")));
        assert!(!antioquia.is_active(None));
    }
}

mod hover {
    use super::*;

    #[test]
    fn hover_is_transient_and_drives_tooltip() {
        let doc = sample_doc();
        let mut view = MapView::default();
        assert_eq!(view.tooltip(&doc), None);

        view.hover("8");
        assert!(view.is_hovered(&doc.features[1]));
        assert!(!view.is_hovered(&doc.features[0]));
        assert_eq!(view.tooltip(&doc), Some("ATLANTICO"));

        view.clear_hover();
        assert!(!view.is_hovered(&doc.features[1]));
        assert_eq!(view.tooltip(&doc), None);
    }

    #[test]
    fn hover_is_independent_of_selection() {
        let doc = sample_doc();
        let mut view = MapView::default();
        view.hover("05");
        // Hovering never makes a region active
        assert!(!doc.features[0].is_active(None));
    }
}
