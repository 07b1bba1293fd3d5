use crate::keyboard::label::SPACE;
use crate::keyboard::layout::KeyboardLayout;

/// Pixel-space constants for laying out the virtual keyboard.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyGeometry {
    pub start_x: f64,
    pub start_y: f64,
    pub key_width: f64,
    pub key_height: f64,
    pub key_spacing: f64,
    pub space_width_multiplier: f64,
    /// Per-row stagger, as a fraction of one key+spacing unit.
    pub row_offsets: Vec<f64>,
}

impl Default for KeyGeometry {
    fn default() -> Self {
        Self {
            start_x: 250.0,
            start_y: 350.0,
            key_width: 60.0,
            key_height: 60.0,
            key_spacing: 10.0,
            space_width_multiplier: 6.0,
            row_offsets: vec![0.0, 1.0, 0.75, 0.75, 0.55],
        }
    }
}

impl KeyGeometry {
    pub fn unit(&self) -> f64 {
        self.key_width + self.key_spacing
    }

    pub fn width_for(&self, label: &str) -> f64 {
        if label == SPACE {
            self.key_width * self.space_width_multiplier
        } else {
            self.key_width
        }
    }

    pub fn row_pitch(&self) -> f64 {
        self.key_height + self.key_spacing
    }
}

/// Where one key sits. `x`/`y` is the center of the key.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyPlacement {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl KeyPlacement {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Lay out every key of `layout`. Rows are centered against the first row and
/// then shifted right by their stagger offset.
pub fn place_keys(layout: &KeyboardLayout, geometry: &KeyGeometry) -> Vec<KeyPlacement> {
    let unit = geometry.unit();
    let rows = layout.rows();
    let reference_width = rows.first().map_or(0, Vec::len) as f64 * unit;

    let mut placements = Vec::with_capacity(rows.iter().map(Vec::len).sum());
    for (row_idx, row) in rows.iter().enumerate() {
        let row_width = row.len() as f64 * unit;
        let offset = geometry.row_offsets.get(row_idx).copied().unwrap_or(0.0) * unit;
        let row_start = geometry.start_x + (reference_width - row_width) / 2.0 + offset;
        let y = geometry.start_y + row_idx as f64 * geometry.row_pitch();

        for (col_idx, label) in row.iter().enumerate() {
            let width = geometry.width_for(label);
            placements.push(KeyPlacement {
                label: label.clone(),
                x: row_start + col_idx as f64 * (width + geometry.key_spacing),
                y,
                width,
                height: geometry.key_height,
            });
        }
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(placements: &'a [KeyPlacement], label: &str) -> &'a KeyPlacement {
        placements.iter().find(|p| p.label == label).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_one_placement_per_label() {
        let layout = KeyboardLayout::qwerty();
        let placements = place_keys(&layout, &KeyGeometry::default());
        assert_eq!(placements.len(), layout.available_keys().len());
    }

    #[test]
    fn test_number_row_starts_at_origin() {
        let placements = place_keys(&KeyboardLayout::qwerty(), &KeyGeometry::default());
        let backtick = find(&placements, "`");
        assert!(approx(backtick.x, 250.0));
        assert!(approx(backtick.y, 350.0));
        assert!(approx(find(&placements, "1").x, 320.0));
    }

    #[test]
    fn test_rows_are_staggered() {
        let placements = place_keys(&KeyboardLayout::qwerty(), &KeyGeometry::default());
        let q = find(&placements, "Q");
        let a = find(&placements, "A");
        let z = find(&placements, "Z");
        assert!(approx(q.x, 355.0));
        assert!(approx(q.y, 420.0));
        assert!(approx(a.x, 372.5));
        assert!(approx(a.y, 490.0));
        assert!(approx(z.x, 407.5));
        assert!(approx(z.y, 560.0));
    }

    #[test]
    fn test_space_is_wide() {
        let placements = place_keys(&KeyboardLayout::qwerty(), &KeyGeometry::default());
        let space = find(&placements, "SPACE");
        assert!(approx(space.width, 360.0));
        assert!(approx(space.x, 708.5));
        assert!(approx(space.y, 630.0));
        assert!(approx(find(&placements, "A").width, 60.0));
    }

    #[test]
    fn test_space_multiplier_is_configurable() {
        let geometry = KeyGeometry {
            space_width_multiplier: 4.0,
            ..KeyGeometry::default()
        };
        let placements = place_keys(&KeyboardLayout::qwerty(), &geometry);
        assert!(approx(find(&placements, "SPACE").width, 240.0));
    }

    #[test]
    fn test_missing_row_offset_defaults_to_zero() {
        let layout = KeyboardLayout::new(vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["C".to_string(), "D".to_string()],
        ])
        .unwrap();
        let geometry = KeyGeometry {
            row_offsets: Vec::new(),
            ..KeyGeometry::default()
        };
        let placements = place_keys(&layout, &geometry);
        assert!(approx(find(&placements, "A").x, find(&placements, "C").x));
    }

    #[test]
    fn test_placement_is_deterministic() {
        let layout = KeyboardLayout::qwerty();
        let geometry = KeyGeometry::default();
        assert_eq!(place_keys(&layout, &geometry), place_keys(&layout, &geometry));
    }

    #[test]
    fn test_edges() {
        let placements = place_keys(&KeyboardLayout::qwerty(), &KeyGeometry::default());
        let backtick = find(&placements, "`");
        assert!(approx(backtick.left(), 220.0));
        assert!(approx(backtick.right(), 280.0));
        assert!(approx(backtick.top(), 320.0));
        assert!(approx(backtick.bottom(), 380.0));
    }
}
