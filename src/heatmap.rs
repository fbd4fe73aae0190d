//! Length heatmaps
//!
//! A [`Heatmap`] lays a string collection into a square [`Grid`] and colors
//! each cell by the length of its string. The figure can be rendered as an
//! SVG document or rasterized through the `image` crate; both carry the
//! title, cell labels, color bar caption and tick values.
//!
//! Row 0 of the grid, which holds the shortest strings, is drawn at the
//! bottom of the plot area.

use std::fmt;
use std::path::Path;

use image::{ImageFormat, Rgb as Pixel, RgbImage};
use log::{debug, info};

use crate::colorscale::{ColorScale, Rgb};
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::raster::{draw_text, Anchor};

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 80.0;
const MARGIN_TOP: f64 = 100.0;
const MARGIN_BOTTOM: f64 = 80.0;

/// Horizontal space reserved right of the plot for the color bar
const COLORBAR_AREA: f64 = 100.0;
const COLORBAR_GAP: f64 = 20.0;
const COLORBAR_WIDTH: f64 = 30.0;
const MAX_TICKS: usize = 10;
const COLORBAR_FONT_SIZE: u32 = 12;

/// Upper bound on raster canvas size, in pixels
const MAX_RASTER_PIXELS: u64 = 1 << 28;

const BACKGROUND: Rgb = Rgb(255, 255, 255);
const FOREGROUND: Rgb = Rgb(42, 63, 95);

/// Figure parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapOptions {
    pub title: String,
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    /// Cell label font size in pixels
    pub font_size: u32,
    /// Caption above the color bar
    pub colorbar_title: String,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 800,
            height: 800,
            font_size: 14,
            colorbar_title: "Length".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

/// A rendered length heatmap
#[derive(Debug, Clone)]
pub struct Heatmap {
    grid: Grid,
    options: HeatmapOptions,
    scale: ColorScale,
}

impl Heatmap {
    pub fn new<S: AsRef<str>>(strings: &[S], options: HeatmapOptions) -> Self {
        Self {
            grid: Grid::from_strings(strings),
            options,
            scale: ColorScale::rainbow(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn options(&self) -> &HeatmapOptions {
        &self.options
    }

    /// Length values as the color bar labels them, `None` for absent cells
    pub fn labels(&self) -> Vec<Vec<Option<String>>> {
        self.grid
            .lengths()
            .into_iter()
            .map(|row| row.into_iter().map(|len| len.map(|l| l.to_string())).collect())
            .collect()
    }

    fn width(&self) -> f64 {
        self.options.width.max(1) as f64
    }

    fn height(&self) -> f64 {
        self.options.height.max(1) as f64
    }

    fn plot_area(&self) -> Rect {
        Rect {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            w: (self.width() - MARGIN_LEFT - MARGIN_RIGHT - COLORBAR_AREA).max(0.0),
            h: (self.height() - MARGIN_TOP - MARGIN_BOTTOM).max(0.0),
        }
    }

    fn colorbar_area(&self) -> Rect {
        let plot = self.plot_area();
        Rect {
            x: plot.x + plot.w + COLORBAR_GAP,
            y: plot.y,
            w: COLORBAR_WIDTH,
            h: plot.h,
        }
    }

    /// Rectangle of grid cell `(row, col)`; row 0 sits at the bottom
    fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let plot = self.plot_area();
        let dim = self.grid.dim().max(1) as f64;
        let (w, h) = (plot.w / dim, plot.h / dim);

        Rect {
            x: plot.x + col as f64 * w,
            y: plot.y + (self.grid.dim() - 1 - row) as f64 * h,
            w,
            h,
        }
    }

    fn range(&self) -> (f64, f64) {
        self.grid
            .length_range()
            .map(|(lo, hi)| (lo as f64, hi as f64))
            .unwrap_or((0.0, 0.0))
    }

    fn color_for(&self, len: usize) -> Rgb {
        let (lo, hi) = self.range();
        self.scale.map(len as f64, lo, hi)
    }

    /// Integer tick values and their vertical position on the color bar
    fn ticks(&self) -> Vec<(usize, f64)> {
        let Some((lo, hi)) = self.grid.length_range() else {
            return Vec::new();
        };

        let bar = self.colorbar_area();
        if lo == hi {
            return vec![(lo, bar.y + bar.h / 2.0)];
        }

        let step = (hi - lo).div_ceil(MAX_TICKS).max(1);
        (lo..=hi)
            .step_by(step)
            .map(|v| {
                let t = (v - lo) as f64 / (hi - lo) as f64;
                (v, bar.y + bar.h * (1.0 - t))
            })
            .collect()
    }

    /// SVG rendering of the figure
    pub fn svg(&self) -> SvgDocument<'_> {
        SvgDocument(self)
    }

    pub fn to_svg(&self) -> String {
        self.svg().to_string()
    }

    /// Rasterize the figure
    pub fn to_image(&self) -> Result<RgbImage> {
        let (width, height) = (self.options.width.max(1), self.options.height.max(1));
        if width as u64 * height as u64 > MAX_RASTER_PIXELS {
            return Err(Error::ImageTooLarge { width, height });
        }
        let mut img = RgbImage::from_pixel(width, height, pixel(BACKGROUND));
        let foreground = pixel(FOREGROUND);

        draw_text(
            &mut img,
            &self.options.title,
            self.width() / 2.0,
            MARGIN_TOP / 2.0,
            self.options.font_size.saturating_add(4),
            foreground,
            Anchor::Middle,
        );

        for (row, cells) in self.grid.rows().iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(text) = cell else { continue };
                let rect = self.cell_rect(row, col);
                let color = self.color_for(crate::grid::display_len(text));

                fill_rect(&mut img, rect, color);
                draw_text(
                    &mut img,
                    text,
                    rect.x + rect.w / 2.0,
                    rect.y + rect.h / 2.0,
                    self.options.font_size,
                    pixel(color.contrasting_text()),
                    Anchor::Middle,
                );
            }
        }

        let bar = self.colorbar_area();
        let rows = bar.h.round() as u32;
        for i in 0..rows {
            let t = 1.0 - (i as f64 + 0.5) / rows as f64;
            let band = Rect {
                x: bar.x,
                y: bar.y + i as f64,
                w: bar.w,
                h: 1.0,
            };
            fill_rect(&mut img, band, self.scale.at(t));
        }

        draw_text(
            &mut img,
            &self.options.colorbar_title,
            bar.x,
            bar.y - 16.0,
            COLORBAR_FONT_SIZE,
            foreground,
            Anchor::Start,
        );
        for (value, y) in self.ticks() {
            draw_text(
                &mut img,
                &value.to_string(),
                bar.x + bar.w + 6.0,
                y,
                COLORBAR_FONT_SIZE,
                foreground,
                Anchor::Start,
            );
        }

        Ok(img)
    }

    /// Export the figure; the format follows the path's extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("svg") => {
                std::fs::write(path, self.to_svg())?;
            }
            Some("png" | "jpg" | "jpeg" | "bmp") => {
                let format = ImageFormat::from_path(path)?;
                self.to_image()?.save_with_format(path, format)?;
            }
            _ => return Err(Error::UnsupportedFormat(path.to_path_buf())),
        }

        info!(
            "Heatmap {}x{} written to {:?}",
            self.grid.dim(),
            self.grid.dim(),
            path
        );
        Ok(())
    }
}

/// Display adapter writing a [`Heatmap`] as a standalone SVG document
pub struct SvgDocument<'a>(&'a Heatmap);

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self.0;
        let opts = &map.options;
        let (width, height) = (map.width(), map.height());

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        )?;
        writeln!(
            f,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width,
            height,
            BACKGROUND.to_hex()
        )?;

        // Color bar gradient runs bottom (shortest) to top (longest)
        writeln!(f, r#"<defs><linearGradient id="colorbar" x1="0" y1="1" x2="0" y2="0">"#)?;
        let stops = map.scale.stops();
        for (i, stop) in stops.iter().enumerate() {
            let offset = i as f64 / (stops.len() - 1) as f64;
            writeln!(
                f,
                r#"<stop offset="{:.4}" stop-color="{}"/>"#,
                offset,
                stop.to_hex()
            )?;
        }
        writeln!(f, "</linearGradient></defs>")?;

        writeln!(
            f,
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="{}" fill="{}">{}</text>"#,
            width / 2.0,
            MARGIN_TOP / 2.0,
            opts.font_size.saturating_add(4),
            FOREGROUND.to_hex(),
            escape_xml(&opts.title)
        )?;

        writeln!(f, r#"<g class="cells" font-family="monospace" font-size="{}">"#, opts.font_size)?;
        for (row, cells) in map.grid.rows().iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(text) = cell else { continue };
                let rect = map.cell_rect(row, col);
                let color = map.color_for(crate::grid::display_len(text));

                writeln!(
                    f,
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    color.to_hex()
                )?;
                if !text.is_empty() {
                    writeln!(
                        f,
                        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text>"#,
                        rect.x + rect.w / 2.0,
                        rect.y + rect.h / 2.0,
                        color.contrasting_text().to_hex(),
                        escape_xml(text)
                    )?;
                }
            }
        }
        writeln!(f, "</g>")?;

        let bar = map.colorbar_area();
        writeln!(
            f,
            r#"<g class="colorbar" font-family="sans-serif" font-size="{}" fill="{}">"#,
            COLORBAR_FONT_SIZE,
            FOREGROUND.to_hex()
        )?;
        writeln!(
            f,
            r#"<text x="{:.2}" y="{:.2}">{}</text>"#,
            bar.x,
            bar.y - 10.0,
            escape_xml(&opts.colorbar_title)
        )?;
        writeln!(
            f,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="url(#colorbar)"/>"#,
            bar.x, bar.y, bar.w, bar.h
        )?;
        for (value, y) in map.ticks() {
            writeln!(
                f,
                r#"<text x="{:.2}" y="{:.2}" dominant-baseline="central">{}</text>"#,
                bar.x + bar.w + 6.0,
                y,
                value
            )?;
        }
        writeln!(f, "</g>")?;

        writeln!(f, "</svg>")
    }
}

/// Build a heatmap from `strings`, exporting it when `output_path` is given
pub fn render_heatmap<S: AsRef<str>>(
    strings: &[S],
    title: &str,
    width: u32,
    height: u32,
    font_size: u32,
    output_path: Option<&Path>,
) -> Result<Heatmap> {
    let options = HeatmapOptions {
        title: title.to_string(),
        width,
        height,
        font_size,
        ..HeatmapOptions::default()
    };

    let heatmap = Heatmap::new(strings, options);
    debug!("Rendering heatmap '{}' ({} strings)", title, strings.len());

    if let Some(path) = output_path {
        heatmap.save(path)?;
    }

    Ok(heatmap)
}

fn pixel(color: Rgb) -> Pixel<u8> {
    Pixel([color.0, color.1, color.2])
}

fn fill_rect(img: &mut RgbImage, rect: Rect, color: Rgb) {
    let clamp_x = |v: f64| (v.round().max(0.0) as u32).min(img.width());
    let clamp_y = |v: f64| (v.round().max(0.0) as u32).min(img.height());

    let (x0, x1) = (clamp_x(rect.x), clamp_x(rect.x + rect.w));
    let (y0, y1) = (clamp_y(rect.y), clamp_y(rect.y + rect.h));

    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, pixel(color));
        }
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use tempfile::TempDir;

    fn options(title: &str) -> HeatmapOptions {
        HeatmapOptions {
            title: title.to_string(),
            width: 400,
            height: 300,
            ..HeatmapOptions::default()
        }
    }

    #[test]
    fn test_default_options() {
        let opts = HeatmapOptions::default();

        assert_eq!((opts.width, opts.height, opts.font_size), (800, 800, 14));
        assert_eq!(opts.title, "");
        assert_eq!(opts.colorbar_title, "Length");
    }

    #[test]
    fn test_labels_follow_grid() {
        let map = Heatmap::new(&["a", "bb", "ccc"], options(""));

        assert_eq!(map.grid().dim(), 2);
        assert_eq!(
            map.labels(),
            vec![
                vec![Some("0".to_string()), Some("1".to_string())],
                vec![Some("2".to_string()), Some("3".to_string())],
            ]
        );
    }

    #[test]
    fn test_first_row_drawn_at_bottom() {
        let map = Heatmap::new(&["a", "bb", "ccc", "dddd"], options(""));

        let bottom = map.cell_rect(0, 0);
        let top = map.cell_rect(1, 0);
        assert!(bottom.y > top.y);
        assert_eq!(top.y, MARGIN_TOP);
    }

    #[test]
    fn test_svg_contents() {
        let map = Heatmap::new(&["a<b", "bb", "c&d", "x"], options("Strings & more"));
        let svg = map.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Strings &amp; more"));
        assert!(svg.contains(">a&lt;b</text>"));
        assert!(svg.contains(">c&amp;d</text>"));
        assert!(svg.contains(">Length</text>"));
        assert!(svg.contains(r#"font-family="monospace" font-size="14""#));
        assert!(svg.contains(r#"width="400" height="300""#));
    }

    #[test]
    fn test_svg_cell_colors_span_scale() {
        let map = Heatmap::new(&["a", "bbb"], options(""));
        let svg = map.to_svg();

        // Padding cell has the shortest length, "bbb" the longest
        let scale = ColorScale::rainbow();
        assert!(svg.contains(&format!(r#"fill="{}"/>"#, scale.at(0.0).to_hex())));
        assert!(svg.contains(&format!(r#"fill="{}"/>"#, scale.at(1.0).to_hex())));
    }

    #[test]
    fn test_ticks() {
        let map = Heatmap::new(&["a", "bb", "ccc"], options(""));
        let values: Vec<usize> = map.ticks().into_iter().map(|(v, _)| v).collect();
        assert_eq!(values, vec![0, 1, 2, 3]);

        let uniform = Heatmap::new(&["a"], options(""));
        assert_eq!(uniform.ticks().len(), 1);
    }

    #[test]
    fn test_empty_input_renders() {
        let strings: Vec<String> = Vec::new();
        let map = Heatmap::new(&strings, options("empty"));

        assert!(map.grid().is_empty());
        assert!(map.ticks().is_empty());

        let svg = map.to_svg();
        assert!(svg.contains(">empty</text>"));
        assert!(!svg.contains("dominant-baseline=\"central\" fill="));
    }

    #[test]
    fn test_render_without_export() {
        let map = render_heatmap(&["a", "b", "c"], "t", 200, 200, 10, None).unwrap();

        assert_eq!(map.grid().dim(), 2);
        assert_eq!(map.options().font_size, 10);
    }

    #[test]
    fn test_export_svg() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.svg");

        let map = render_heatmap(&["a", "bb"], "svg", 300, 300, 12, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, map.to_svg());
    }

    #[test]
    fn test_export_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.png");

        render_heatmap(&["a", "bb", "ccc", "dddd"], "png", 320, 240, 12, Some(&path)).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.dimensions(), (320, 240));
    }

    #[test]
    fn test_raster_cell_color() {
        let map = Heatmap::new(&["a", "bb", "ccc", "dddd"], options(""));
        let img = map.to_image().unwrap();

        // Corner of the cell, clear of the centered label
        let rect = map.cell_rect(1, 1);
        let corner = img.get_pixel((rect.x + 2.0) as u32, (rect.y + 2.0) as u32);
        assert_eq!(*corner, pixel(ColorScale::rainbow().at(1.0)));
    }

    #[test]
    fn test_raster_carries_labels_and_captions() {
        let first = Heatmap::new(&["ab", "cd", "ef", "gh"], HeatmapOptions {
            title: "First".to_string(),
            ..HeatmapOptions::default()
        });
        let second = Heatmap::new(&["zz", "yy", "xx", "ww"], HeatmapOptions {
            title: "Completely different".to_string(),
            colorbar_title: "Other".to_string(),
            ..HeatmapOptions::default()
        });
        assert_eq!(first.grid().lengths(), second.grid().lengths());
        assert_ne!(first.to_image().unwrap().as_raw(), second.to_image().unwrap().as_raw());

        // Same cells, only the title differs
        let retitled = Heatmap::new(&["ab", "cd", "ef", "gh"], HeatmapOptions {
            title: "Second".to_string(),
            ..HeatmapOptions::default()
        });
        assert_ne!(first.to_image().unwrap().as_raw(), retitled.to_image().unwrap().as_raw());
    }

    #[test]
    fn test_raster_label_pixels_in_cell() {
        let map = Heatmap::new(&["a", "bb", "ccc", "dddd"], options(""));
        let img = map.to_image().unwrap();

        let rect = map.cell_rect(1, 1);
        let fill = pixel(ColorScale::rainbow().at(1.0));
        let text = pixel(ColorScale::rainbow().at(1.0).contrasting_text());
        let inked = (rect.y as u32..(rect.y + rect.h) as u32)
            .flat_map(|y| (rect.x as u32..(rect.x + rect.w) as u32).map(move |x| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) == text)
            .count();

        assert!(inked > 0);
        assert_ne!(fill, text);
    }

    #[test]
    fn test_oversized_raster_is_an_error() {
        let map = Heatmap::new(&["a"], HeatmapOptions {
            width: u32::MAX,
            height: u32::MAX,
            ..HeatmapOptions::default()
        });

        assert!(matches!(
            map.to_image(),
            Err(Error::ImageTooLarge { width: u32::MAX, height: u32::MAX })
        ));
    }

    #[test]
    fn test_unsupported_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.gif");

        let err = render_heatmap(&["a"], "", 100, 100, 10, Some(&path)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("map.svg");

        let err = render_heatmap(&["a"], "", 100, 100, 10, Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
