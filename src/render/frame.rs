use crate::core::DrawingArea;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    LinePrimitive, MarkerPrimitive, PolygonPrimitive, PolylinePrimitive, RectPrimitive,
    TextPrimitive,
};

/// Backend-agnostic scene for one chart draw pass.
///
/// Each primitive list is in paint order. Backends paint fills, then lines,
/// then polylines, then the marker, then label boxes and texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub area: DrawingArea,
    pub fills: Vec<PolygonPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub markers: Vec<MarkerPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(area: DrawingArea) -> Self {
        Self {
            area,
            fills: Vec::new(),
            lines: Vec::new(),
            polylines: Vec::new(),
            markers: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.area.is_valid() && !self.is_empty() {
            return Err(ChartError::InvalidDrawingArea {
                width: self.area.width(),
                height: self.area.height(),
            });
        }

        for fill in &self.fills {
            fill.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
            && self.lines.is_empty()
            && self.polylines.is_empty()
            && self.markers.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
    }
}
