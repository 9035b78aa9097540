use taskflow_graph::Position;

/// Maps screen coordinates to model coordinates.
///
/// Supplied by the rendering layer; the editor only uses it to place new
/// nodes.
pub trait ViewportProjection {
  /// Convert a screen point to model space.
  fn project(&self, screen: Position) -> Position;

  /// Center of the visible area, in screen space.
  fn screen_center(&self) -> Position;

  /// Center of the visible area, in model space.
  fn model_center(&self) -> Position {
    self.project(self.screen_center())
  }
}

/// A pan/zoom transform over a fixed-size canvas.
///
/// A model point `m` is drawn at `m * zoom + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
  pub x: f64,
  pub y: f64,
  pub zoom: f64,
  pub width: f64,
  pub height: f64,
}

impl Default for Viewport {
  fn default() -> Self {
    Self {
      x: 0.0,
      y: 0.0,
      zoom: 1.0,
      width: 800.0,
      height: 600.0,
    }
  }
}

impl ViewportProjection for Viewport {
  fn project(&self, screen: Position) -> Position {
    // A zero or non-finite zoom cannot be inverted; treat it as unscaled
    let zoom = if self.zoom.is_finite() && self.zoom != 0.0 {
      self.zoom
    } else {
      1.0
    };
    let pan_x = if self.x.is_finite() { self.x } else { 0.0 };
    let pan_y = if self.y.is_finite() { self.y } else { 0.0 };
    Position::new((screen.x - pan_x) / zoom, (screen.y - pan_y) / zoom)
  }

  fn screen_center(&self) -> Position {
    Position::new(self.width / 2.0, self.height / 2.0)
  }
}
