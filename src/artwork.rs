//! The fixed Teachers Day artwork
//!
//! Everything the scene contains is declared here: the sky gradient, cloud
//! clusters, the airplane with its motion trail, the greeting text, the
//! floating school symbols and the banner trailing behind the airplane. All
//! layout values are fixed; the only parameter the composition functions take
//! is an anchor, and translating it shifts their shapes uniformly.

use crate::error::RenderResult;
use crate::scene::{
    Background, Edge, FontStyle, FontWeight, Geometry, HAlign, Scene, Shape, TextLayer, VAlign,
};
use crate::types::{Color, Point, Rect};

/// Logical canvas bounds
pub const CANVAS_WIDTH: f64 = 100.0;
pub const CANVAS_HEIGHT: f64 = 100.0;

/// Default airplane anchor
pub const AIRPLANE_ANCHOR: Point = Point { x: 50.0, y: 45.0 };

/// Sky gradient endpoints: light blue up high, deeper blue near the ground
pub const SKY_TOP: Color = Color::rgb(0.8, 0.9, 1.0);
pub const SKY_BOTTOM: Color = Color::rgb(0.5, 0.7, 0.9);
const SKY_OPACITY: f64 = 0.8;

/// Cloud cluster centers
const CLOUD_POSITIONS: [(f64, f64); 5] = [
    (20.0, 75.0),
    (60.0, 80.0),
    (85.0, 70.0),
    (15.0, 85.0),
    (45.0, 90.0),
];

/// Puff offsets and radii within one cluster
const CLOUD_PUFFS: [(f64, f64, f64); 4] = [
    (-2.0, 0.0, 4.0),
    (0.0, 0.0, 5.0),
    (2.0, 0.0, 4.0),
    (0.0, 2.0, 3.0),
];

/// Window centers along the fuselage, as x offsets from the anchor
const WINDOW_OFFSETS: [f64; 5] = [-10.0, -5.0, 0.0, 5.0, 10.0];

/// Engine centers as offsets from the anchor
const ENGINE_OFFSETS: [(f64, f64); 2] = [(-2.0, -6.0), (8.0, -6.0)];

const MOTION_LINE_COUNT: usize = 5;

/// Floating school symbols and their positions
const SYMBOLS: [(&str, (f64, f64)); 5] = [
    ("\u{1F4DA}", (25.0, 30.0)),         // books
    ("\u{270F}\u{FE0F}", (75.0, 35.0)),  // pencil
    ("\u{1F393}", (20.0, 60.0)),         // graduation cap
    ("\u{1F4DD}", (80.0, 25.0)),         // memo
    ("\u{1F34E}", (85.0, 55.0)),         // apple
];

pub const TITLE: &str = "Happy Teachers' Day!";
pub const SUBTITLE: &str = "Soaring to New Heights with Great Teachers";
pub const BANNER_TEXT: &str = "Thank You\nTeachers!";

/// Build the complete fixed scene
pub fn teachers_day_scene() -> RenderResult<Scene> {
    let mut scene = Scene::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    scene.set_background(Background {
        top: SKY_TOP,
        bottom: SKY_BOTTOM,
        opacity: SKY_OPACITY,
    });

    for (x, y) in CLOUD_POSITIONS {
        add_cloud_cluster(&mut scene, Point::new(x, y));
    }

    add_airplane(&mut scene, AIRPLANE_ANCHOR)?;
    add_banner(&mut scene, AIRPLANE_ANCHOR)?;

    scene.push_text(TextLayer {
        anchor: Point::new(50.0, 25.0),
        content: TITLE.to_string(),
        size: 28.0,
        weight: FontWeight::Bold,
        style: FontStyle::Normal,
        color: Color::from_hex("#2E4057")?,
        h_align: HAlign::Center,
        v_align: VAlign::Center,
        z_order: 10,
    });
    scene.push_text(TextLayer {
        anchor: Point::new(50.0, 18.0),
        content: SUBTITLE.to_string(),
        size: 16.0,
        weight: FontWeight::Normal,
        style: FontStyle::Italic,
        color: Color::from_hex("#34495E")?,
        h_align: HAlign::Center,
        v_align: VAlign::Center,
        z_order: 10,
    });

    for (symbol, (x, y)) in SYMBOLS {
        scene.push_text(TextLayer {
            anchor: Point::new(x, y),
            content: symbol.to_string(),
            size: 20.0,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            color: Color::black(),
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            z_order: 8,
        });
    }

    Ok(scene)
}

/// Four overlapping white circles approximating one fluffy cloud
pub fn add_cloud_cluster(scene: &mut Scene, center: Point) {
    for (dx, dy, radius) in CLOUD_PUFFS {
        scene.push_shape(Shape {
            geometry: Geometry::Circle {
                center: center.offset(dx, dy),
                radius,
            },
            fill: Color::white(),
            edge: None,
            opacity: 0.8,
            z_order: 1,
        });
    }
}

/// The airplane: fuselage, nose, wings, tail fin, windows, engines with
/// intakes, and the fading motion trail. Exactly 19 shapes, all positioned
/// relative to `anchor`.
pub fn add_airplane(scene: &mut Scene, anchor: Point) -> RenderResult<()> {
    let fuselage_fill = Color::from_hex("#E8E8E8")?;
    let fuselage_edge = Color::from_hex("#B0B0B0")?;
    let nose_fill = Color::from_hex("#D0D0D0")?;
    let wing_fill = Color::from_hex("#C0C0C0")?;
    let wing_edge = Color::from_hex("#A0A0A0")?;
    let window_fill = Color::from_hex("#87CEEB")?;
    let window_edge = Color::from_hex("#4682B4")?;
    let engine_fill = Color::from_hex("#A0A0A0")?;
    let engine_edge = Color::from_hex("#808080")?;
    let intake_fill = Color::from_hex("#606060")?;

    // Fuselage
    scene.push_shape(Shape {
        geometry: Geometry::Rect {
            rect: Rect::new(anchor.x - 15.0, anchor.y - 2.0, 30.0, 4.0),
        },
        fill: fuselage_fill,
        edge: Some(Edge { color: fuselage_edge, width: 2.0 }),
        opacity: 1.0,
        z_order: 5,
    });

    // Nose cone
    scene.push_shape(Shape {
        geometry: Geometry::Polygon {
            vertices: vec![
                anchor.offset(15.0, 0.0),
                anchor.offset(20.0, 0.0),
                anchor.offset(15.0, 2.0),
                anchor.offset(15.0, -2.0),
            ],
        },
        fill: nose_fill,
        edge: Some(Edge { color: fuselage_edge, width: 2.0 }),
        opacity: 1.0,
        z_order: 5,
    });

    // Main wing
    scene.push_shape(Shape {
        geometry: Geometry::Rect {
            rect: Rect::new(anchor.x - 5.0, anchor.y - 8.0, 20.0, 16.0),
        },
        fill: wing_fill,
        edge: Some(Edge { color: wing_edge, width: 2.0 }),
        opacity: 1.0,
        z_order: 4,
    });

    // Tail wing
    scene.push_shape(Shape {
        geometry: Geometry::Rect {
            rect: Rect::new(anchor.x - 12.0, anchor.y + 6.0, 8.0, 6.0),
        },
        fill: wing_fill,
        edge: Some(Edge { color: wing_edge, width: 2.0 }),
        opacity: 1.0,
        z_order: 4,
    });

    // Vertical stabilizer
    scene.push_shape(Shape {
        geometry: Geometry::Polygon {
            vertices: vec![
                anchor.offset(-15.0, 2.0),
                anchor.offset(-15.0, 12.0),
                anchor.offset(-8.0, 8.0),
                anchor.offset(-8.0, 2.0),
            ],
        },
        fill: wing_fill,
        edge: Some(Edge { color: wing_edge, width: 2.0 }),
        opacity: 1.0,
        z_order: 4,
    });

    // Windows
    for dx in WINDOW_OFFSETS {
        scene.push_shape(Shape {
            geometry: Geometry::Circle {
                center: anchor.offset(dx, 1.0),
                radius: 1.2,
            },
            fill: window_fill,
            edge: Some(Edge { color: window_edge, width: 1.0 }),
            opacity: 1.0,
            z_order: 6,
        });
    }

    // Engines and their intakes
    for (dx, dy) in ENGINE_OFFSETS {
        scene.push_shape(Shape {
            geometry: Geometry::Circle {
                center: anchor.offset(dx, dy),
                radius: 2.5,
            },
            fill: engine_fill,
            edge: Some(Edge { color: engine_edge, width: 2.0 }),
            opacity: 1.0,
            z_order: 4,
        });
    }
    for (dx, dy) in ENGINE_OFFSETS {
        scene.push_shape(Shape {
            geometry: Geometry::Circle {
                center: anchor.offset(dx, dy),
                radius: 1.0,
            },
            fill: intake_fill,
            edge: None,
            opacity: 1.0,
            z_order: 5,
        });
    }

    // Motion lines trailing behind, shrinking and fading with distance
    for i in 0..MOTION_LINE_COUNT {
        let index = i as f64;
        let y_offset = anchor.y + (index - 2.0) * 2.0;
        scene.push_shape(Shape {
            geometry: Geometry::Rect {
                rect: Rect::new(
                    anchor.x - 25.0 - index * 2.0,
                    y_offset - 0.3,
                    8.0 - index,
                    0.6,
                ),
            },
            fill: Color::white(),
            edge: None,
            opacity: 0.6 - index * 0.1,
            z_order: 2,
        });
    }

    Ok(())
}

/// The banner quadrilateral trailing behind the airplane, with its two-line
/// thank-you text centered on it
pub fn add_banner(scene: &mut Scene, anchor: Point) -> RenderResult<()> {
    scene.push_shape(Shape {
        geometry: Geometry::Polygon {
            vertices: vec![
                anchor.offset(-20.0, 15.0),
                anchor.offset(-45.0, 20.0),
                anchor.offset(-45.0, 25.0),
                anchor.offset(-20.0, 20.0),
            ],
        },
        fill: Color::from_hex("#FF6B6B")?,
        edge: Some(Edge {
            color: Color::from_hex("#E74C3C")?,
            width: 2.0,
        }),
        opacity: 0.9,
        z_order: 3,
    });

    scene.push_text(TextLayer {
        anchor: anchor.offset(-32.5, 22.5),
        content: BANNER_TEXT.to_string(),
        size: 10.0,
        weight: FontWeight::Bold,
        style: FontStyle::Normal,
        color: Color::white(),
        h_align: HAlign::Center,
        v_align: VAlign::Center,
        z_order: 7,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Element;

    /// Collect a representative coordinate from every shape for translation
    /// comparisons
    fn shape_origins(scene: &Scene) -> Vec<(f64, f64)> {
        scene
            .shapes()
            .map(|shape| match &shape.geometry {
                Geometry::Rect { rect } => (rect.x, rect.y),
                Geometry::Circle { center, .. } => (center.x, center.y),
                Geometry::Polygon { vertices } => (vertices[0].x, vertices[0].y),
            })
            .collect()
    }

    #[test]
    fn airplane_emits_exactly_nineteen_shapes() {
        let mut scene = Scene::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        add_airplane(&mut scene, AIRPLANE_ANCHOR).unwrap();
        assert_eq!(scene.shapes().count(), 19);

        let mut rects = 0;
        let mut circles = 0;
        let mut polygons = 0;
        for shape in scene.shapes() {
            match shape.geometry {
                Geometry::Rect { .. } => rects += 1,
                Geometry::Circle { .. } => circles += 1,
                Geometry::Polygon { .. } => polygons += 1,
            }
        }
        // 1 fuselage + 2 wings + 5 motion lines, 5 windows + 2 engines +
        // 2 intakes, nose + tail fin.
        assert_eq!(rects, 8);
        assert_eq!(circles, 9);
        assert_eq!(polygons, 2);
    }

    #[test]
    fn anchor_translation_shifts_every_shape_uniformly() {
        let mut at_default = Scene::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        add_airplane(&mut at_default, AIRPLANE_ANCHOR).unwrap();
        let mut shifted = Scene::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        add_airplane(&mut shifted, AIRPLANE_ANCHOR.offset(7.0, -3.0)).unwrap();

        let before = shape_origins(&at_default);
        let after = shape_origins(&shifted);
        assert_eq!(before.len(), after.len());
        for ((x0, y0), (x1, y1)) in before.iter().zip(after.iter()) {
            assert!((x1 - x0 - 7.0).abs() < 1e-9);
            assert!((y1 - y0 + 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn motion_line_opacity_strictly_decreases() {
        let mut scene = Scene::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        add_airplane(&mut scene, AIRPLANE_ANCHOR).unwrap();
        let opacities: Vec<f64> = scene
            .shapes()
            .filter(|shape| shape.z_order == 2)
            .map(|shape| shape.opacity)
            .collect();
        assert_eq!(opacities.len(), 5);
        for pair in opacities.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn full_scene_has_expected_composition() {
        let scene = teachers_day_scene().unwrap();
        assert!(scene.background.is_some());

        // 5 clusters x 4 puffs + 19 airplane shapes + 1 banner quad.
        assert_eq!(scene.shapes().count(), 40);
        // Title, subtitle, 5 symbols, banner text.
        assert_eq!(scene.text_layers().count(), 8);

        let banner_text = scene
            .text_layers()
            .find(|layer| layer.content == BANNER_TEXT)
            .expect("banner text present");
        assert_eq!(banner_text.content.lines().count(), 2);
        assert_eq!(banner_text.z_order, 7);

        // Text always stacks above the shapes it annotates.
        let max_shape_z = scene.shapes().map(|s| s.z_order).max().unwrap();
        let title = scene
            .text_layers()
            .find(|layer| layer.content == TITLE)
            .expect("title present");
        assert!(title.z_order > max_shape_z);
    }

    #[test]
    fn cloud_cluster_emits_four_translucent_circles() {
        let mut scene = Scene::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        add_cloud_cluster(&mut scene, Point::new(20.0, 75.0));
        assert_eq!(scene.elements.len(), 4);
        for element in &scene.elements {
            match element {
                Element::Shape(shape) => {
                    assert!(matches!(shape.geometry, Geometry::Circle { .. }));
                    assert_eq!(shape.opacity, 0.8);
                    assert_eq!(shape.z_order, 1);
                }
                Element::Text(_) => panic!("clouds contain no text"),
            }
        }
    }
}
