//! Declarative scene description
//!
//! A [`Scene`] is a plain value: canvas bounds, an optional gradient
//! background and an ordered list of drawable elements. Nothing here touches
//! a pixel buffer; rasterization happens in [`crate::renderer`].
//!
//! Elements carry an explicit stacking priority (`z_order`). Rendering sorts
//! by it with a stable sort, so elements sharing a priority keep their
//! insertion order, matching the back-to-front layering the artwork relies
//! on.

use serde::{Deserialize, Serialize};

use crate::types::{Color, Point, Rect};

/// Shape outline style: edge color plus line width in plot points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub color: Color,
    pub width: f64,
}

/// Geometric variants a shape can take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Rect { rect: Rect },
    Circle { center: Point, radius: f64 },
    Polygon { vertices: Vec<Point> },
}

/// One filled (optionally outlined) shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub geometry: Geometry,
    pub fill: Color,
    pub edge: Option<Edge>,
    pub opacity: f64,
    pub z_order: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Baseline,
    Center,
}

/// One text primitive
///
/// `content` may contain newlines; lines are stacked downward from the
/// anchor with a fixed line-spacing factor. No wrapping or overflow handling
/// is performed, placement correctness is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    pub anchor: Point,
    pub content: String,
    /// Font size in plot points
    pub size: f64,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub color: Color,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub z_order: i32,
}

/// Drawable element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Element {
    Shape(Shape),
    Text(TextLayer),
}

impl Element {
    pub fn z_order(&self) -> i32 {
        match self {
            Element::Shape(shape) => shape.z_order,
            Element::Text(text) => text.z_order,
        }
    }
}

/// Vertical gradient background, blitted below every element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub top: Color,
    pub bottom: Color,
    pub opacity: f64,
}

/// The full scene: bounds, background and ordered element list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Logical canvas width in units
    pub width: f64,
    /// Logical canvas height in units
    pub height: f64,
    pub background: Option<Background>,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            elements: Vec::new(),
        }
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }

    pub fn push_shape(&mut self, shape: Shape) {
        self.elements.push(Element::Shape(shape));
    }

    pub fn push_text(&mut self, text: TextLayer) {
        self.elements.push(Element::Text(text));
    }

    /// Elements in paint order: ascending stacking priority, insertion order
    /// preserved within equal priorities
    pub fn elements_by_z_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|element| element.z_order());
        ordered
    }

    /// Shapes only, in insertion order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.elements.iter().filter_map(|element| match element {
            Element::Shape(shape) => Some(shape),
            Element::Text(_) => None,
        })
    }

    /// Text layers only, in insertion order
    pub fn text_layers(&self) -> impl Iterator<Item = &TextLayer> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(text) => Some(text),
            Element::Shape(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_at(z_order: i32, x: f64) -> Shape {
        Shape {
            geometry: Geometry::Rect {
                rect: Rect::new(x, 0.0, 1.0, 1.0),
            },
            fill: Color::white(),
            edge: None,
            opacity: 1.0,
            z_order,
        }
    }

    #[test]
    fn z_order_sort_is_stable_for_equal_keys() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.push_shape(shape_at(5, 1.0));
        scene.push_shape(shape_at(2, 2.0));
        scene.push_shape(shape_at(5, 3.0));
        scene.push_shape(shape_at(2, 4.0));

        let xs: Vec<f64> = scene
            .elements_by_z_order()
            .iter()
            .map(|element| match element {
                Element::Shape(s) => match &s.geometry {
                    Geometry::Rect { rect } => rect.x,
                    _ => unreachable!(),
                },
                _ => unreachable!(),
            })
            .collect();

        // Ascending z; within equal z the insertion order survives.
        assert_eq!(xs, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn scene_serializes_round_trip() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.set_background(Background {
            top: Color::rgb(0.8, 0.9, 1.0),
            bottom: Color::rgb(0.5, 0.7, 0.9),
            opacity: 0.8,
        });
        scene.push_shape(Shape {
            geometry: Geometry::Circle {
                center: Point::new(20.0, 75.0),
                radius: 5.0,
            },
            fill: Color::white(),
            edge: None,
            opacity: 0.8,
            z_order: 1,
        });
        scene.push_text(TextLayer {
            anchor: Point::new(50.0, 25.0),
            content: "Happy Teachers' Day!".to_string(),
            size: 28.0,
            weight: FontWeight::Bold,
            style: FontStyle::Normal,
            color: Color::from_hex("#2E4057").unwrap(),
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            z_order: 10,
        });

        let json = serde_json::to_string(&scene).unwrap();
        let restored: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(scene, restored);
    }
}
