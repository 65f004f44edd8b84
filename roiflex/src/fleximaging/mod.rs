//! FlexImaging `Area` documents.
//!
//! Every area becomes one top-level element:
//!
//! ```xml
//! <Area Type="3" Name="myroi_1" Enabled="0" ShowSpectra="0" SpectrumColor="#9e0142">
//!   <Raster>100,100</Raster>
//!   <Method>mymethod.par</Method>
//!   <Point>12,40</Point>
//!   ...
//! </Area>
//! ```
//!
//! The instrument reads the elements back to back, without an enclosing root.

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use strum_macros::Display;

use crate::config::ExportSettings;
use crate::error::{Error, Result};
use crate::geometry::{Area, Point, Shape};
use crate::palette::spectral_palette;

const INDENT: usize = 2;

/// Value of the `Type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AreaType {
    #[strum(to_string = "0")]
    Rectangle,
    #[strum(to_string = "3")]
    Polygon,
}

impl AreaType {
    fn for_point_count(count: usize) -> Self {
        if count < 3 {
            AreaType::Rectangle
        } else {
            AreaType::Polygon
        }
    }
}

/// One `<Area>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaElement {
    pub area_type: AreaType,
    pub name: String,
    /// `#rrggbb`
    pub spectrum_color: String,
    /// `"pitch,pitch"`
    pub raster: String,
    pub method: String,
    pub points: Vec<Point>,
}

impl AreaElement {
    fn write<W: Write>(&self, writer: &mut Writer<W>) -> quick_xml::Result<()> {
        let area_type = self.area_type.to_string();
        let start = BytesStart::new("Area").with_attributes([
            ("Type", area_type.as_str()),
            ("Name", self.name.as_str()),
            ("Enabled", "0"),
            ("ShowSpectra", "0"),
            ("SpectrumColor", self.spectrum_color.as_str()),
        ]);
        writer.write_event(Event::Start(start))?;

        writer
            .create_element("Raster")
            .write_text_content(BytesText::new(&self.raster))?;
        writer
            .create_element("Method")
            .write_text_content(BytesText::new(&self.method))?;
        for point in &self.points {
            writer
                .create_element("Point")
                .write_text_content(BytesText::new(&point.to_string()))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Area")))?;
        Ok(())
    }
}

/// Serialized areas in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<AreaElement>,
}

impl Document {
    pub fn elements(&self) -> &[AreaElement] {
        &self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Top-level elements one after another, each ending in a newline.
    pub fn to_xml(&self) -> Result<String> {
        let mut out = Vec::new();
        for element in &self.elements {
            let mut writer = Writer::new_with_indent(&mut out, b' ', INDENT);
            element.write(&mut writer)?;
            out.push(b'\n');
        }
        into_string(out)
    }

    /// All elements wrapped in a single `<root>` element.
    pub fn to_xml_rooted(&self, root: &str) -> Result<String> {
        let mut out = Vec::new();
        let mut writer = Writer::new_with_indent(&mut out, b' ', INDENT);
        writer.write_event(Event::Start(BytesStart::new(root)))?;
        for element in &self.elements {
            element.write(&mut writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(root)))?;
        out.push(b'\n');
        into_string(out)
    }

    /// Writes [`Document::to_xml`] to `path`, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let xml = self.to_xml()?;

        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut out = BufWriter::new(file);
        out.write_all(xml.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| Error::io(path, e))?;

        info!("Wrote {} areas to {}", self.elements.len(), path.display());
        Ok(())
    }
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| Error::Xml(quick_xml::Error::NonDecodable(Some(e.utf8_error()))))
}

/// Builds the document for `areas`.
///
/// Polygon sets are ordered by their minimum x first; box sets keep the
/// given order. Names, colors and numbering are assigned over the whole set
/// before polygons with fewer than two points are dropped, so dropping never
/// renumbers the remaining areas.
pub fn serialize(areas: &[Area], settings: &ExportSettings) -> Result<Document> {
    let Some(shape) = areas.first().map(Area::shape) else {
        return Ok(Document::default());
    };
    if let Some(i) = areas.iter().position(|a| a.shape() != shape) {
        return Err(Error::Config(format!(
            "area {} is a {} but the set holds {}s",
            i + 1,
            areas[i].shape(),
            shape
        )));
    }

    let mut ordered: Vec<&Area> = areas.iter().collect();
    if shape == Shape::Polygon {
        ordered.sort_by_key(|a| a.min_x());
    }

    let palette = spectral_palette(ordered.len());
    let raster = format!("{},{}", settings.raster_pitch, settings.raster_pitch);

    let mut elements = Vec::with_capacity(ordered.len());
    for (j, (area, color)) in ordered.iter().zip(&palette).enumerate() {
        let name = format!("{}{}", settings.name_prefix, j + 1);
        let points = area.points();

        if shape == Shape::Polygon && points.len() < 2 {
            warn!("Dropping area {} with {} point(s)", name, points.len());
            continue;
        }

        elements.push(AreaElement {
            area_type: AreaType::for_point_count(points.len()),
            name,
            spectrum_color: color.to_hex(),
            raster: raster.clone(),
            method: settings.method.clone(),
            points,
        });
    }

    debug!(
        "Serialized {} of {} {} areas",
        elements.len(),
        areas.len(),
        shape
    );

    Ok(Document { elements })
}
