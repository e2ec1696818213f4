use foundation::Rgba;

use crate::layer::{LayerKind, MapLayer};
use crate::symbology::{FillStyle, LabelStyle, LineStyle};

/// Layer that receives click and hover events.
pub const INTERACTIVE_LAYER_ID: &str = "outline-core";

/// Basemap layer the region fill is slotted under.
pub const BASEMAP_LAYER_ID: &str = "osm";

/// Ordered layer table for a region source.
pub fn region_layers(source: &str) -> Vec<MapLayer> {
    let cyan = Rgba::opaque(0x00, 0xff, 0xff);
    vec![
        MapLayer::new(
            "area-fill",
            source,
            LayerKind::Fill(FillStyle {
                color: cyan.with_alpha(0.04),
                outline: cyan.with_alpha(0.9),
            }),
        )
        .before(BASEMAP_LAYER_ID),
        MapLayer::new(
            INTERACTIVE_LAYER_ID,
            source,
            LayerKind::Line(LineStyle::new(cyan, 2.0, 1.0)),
        ),
        MapLayer::new(
            "outline-glow-1",
            source,
            LayerKind::Line(LineStyle::new(cyan, 9.0, 0.18)),
        ),
        MapLayer::new(
            "outline-glow-2",
            source,
            LayerKind::Line(LineStyle::new(Rgba::opaque(0x00, 0xba, 0xff), 18.0, 0.08)),
        ),
        MapLayer::new(
            "outline-sheen",
            source,
            LayerKind::Line(LineStyle::new(Rgba::opaque(0x7f, 0xff, 0xd4), 1.0, 0.25).with_blur(0.5)),
        ),
        MapLayer::new(
            "labels",
            source,
            LayerKind::Symbol(LabelStyle {
                text_property: "name".to_string(),
                size_px: 12.0,
                color: Rgba::opaque(0x9f, 0xef, 0xff),
                halo_color: Rgba::new(0, 0, 0, 0.7),
                halo_width_px: 1.0,
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{INTERACTIVE_LAYER_ID, region_layers};
    use crate::layer::LayerKind;

    #[test]
    fn glow_stack_widens_and_fades() {
        let layers = region_layers("chinaz");
        let lines: Vec<(f64, f64)> = layers
            .iter()
            .filter_map(|l| match &l.kind {
                LayerKind::Line(s) => Some((s.width_px, s.opacity)),
                _ => None,
            })
            .collect();
        assert_eq!(lines[..3], [(2.0, 1.0), (9.0, 0.18), (18.0, 0.08)]);
    }

    #[test]
    fn fill_goes_under_basemap_and_interactive_layer_exists() {
        let layers = region_layers("chinaz");
        assert_eq!(layers[0].id.as_str(), "area-fill");
        assert_eq!(layers[0].before.as_ref().map(|l| l.as_str()), Some("osm"));
        assert!(layers.iter().any(|l| l.id.as_str() == INTERACTIVE_LAYER_ID));
        assert!(layers.iter().all(|l| l.source == "chinaz"));
    }
}
