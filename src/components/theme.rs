//! Visual theming shared by the graph and treemap views.
//!
//! Provides colors, categorical palettes, and per-view style configuration.

use super::treemap::Tile;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque black.
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	/// Opaque white.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// Opaque color from 8-bit channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color from 8-bit channels and an opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parses a 24-bit hex literal such as `0x1f77b4`.
	pub const fn hex(value: u32) -> Self {
		Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
	}

	/// Same color with opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Whether the alpha is 1 within rounding.
	pub fn is_opaque(self) -> bool {
		(self.a - 1.0).abs() < 0.001
	}

	/// Hex notation without alpha; pair with an explicit opacity attribute.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// An ordered categorical color scheme.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	/// Colors in assignment order.
	pub colors: Vec<Color>,
}

impl Palette {
	/// Ten distinct hues, the classic categorical scheme.
	pub fn category10() -> Self {
		Self {
			colors: [
				0x1f77b4, 0xff7f0e, 0x2ca02c, 0xd62728, 0x9467bd, 0x8c564b, 0xe377c2, 0x7f7f7f,
				0xbcbd22, 0x17becf,
			]
			.into_iter()
			.map(Color::hex)
			.collect(),
		}
	}

	/// Eight dark qualitative colors, readable under white text.
	pub fn dark2() -> Self {
		Self {
			colors: [
				0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02, 0xa6761d, 0x666666,
			]
			.into_iter()
			.map(Color::hex)
			.collect(),
		}
	}

	/// Color at `index`, cycling when the palette is exhausted.
	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Color::BLACK;
		}
		self.colors[index % self.colors.len()]
	}
}

/// Edge (link) line style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke color, translucent so crossings stay readable.
	pub color: Color,
	/// Output range of the value-to-width scale.
	pub width_range: (f64, f64),
}

/// Node (circle) style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Stroke around each circle.
	pub border_color: Color,
	/// Stroke width around each circle.
	pub border_width: f64,
	/// Output range of the value-to-radius scale.
	pub radius_range: (f64, f64),
}

/// Legend layout and typography.
#[derive(Clone, Debug)]
pub struct LegendStyle {
	/// Top-left corner of the first row, in inner coordinates.
	pub offset: (f64, f64),
	/// Vertical distance between rows.
	pub row_height: f64,
	/// Side of the square color swatch.
	pub swatch_size: f64,
	/// Label x offset within a row.
	pub label_x: f64,
	/// Label baseline within a row.
	pub label_y: f64,
	/// Label font size in pixels.
	pub font_size: f64,
	/// Label fill.
	pub text_color: Color,
}

/// Complete style for the graph view.
#[derive(Clone, Debug)]
pub struct GraphStyle {
	/// Link lines.
	pub edge: EdgeStyle,
	/// Node circles.
	pub node: NodeStyle,
	/// Legend block.
	pub legend: LegendStyle,
	/// Node and legend colors, keyed by node name.
	pub palette: Palette,
}

impl Default for GraphStyle {
	fn default() -> Self {
		Self {
			edge: EdgeStyle {
				color: Color::rgba(153, 153, 153, 0.6),
				width_range: (2.0, 6.0),
			},
			node: NodeStyle {
				border_color: Color::WHITE,
				border_width: 1.5,
				radius_range: (10.0, 50.0),
			},
			legend: LegendStyle {
				offset: (10.0, 10.0),
				row_height: 20.0,
				swatch_size: 12.0,
				label_x: 18.0,
				label_y: 10.0,
				font_size: 10.0,
				text_color: Color::BLACK,
			},
			palette: Palette::category10(),
		}
	}
}

/// Cell label thresholds and typography.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Labels are drawn only when the cell is strictly wider than this.
	pub min_width: f64,
	/// Labels are drawn only when the cell is strictly taller than this.
	pub min_height: f64,
	/// Smallest font size a label is clamped to.
	pub font_min: f64,
	/// Largest font size a label is clamped to.
	pub font_max: f64,
	/// Average glyph advance as a fraction of the font size.
	pub char_width: f64,
	/// Offset of the first label line from the cell's top-left corner.
	pub inset: (f64, f64),
	/// Label fill.
	pub color: Color,
}

/// Complete style for the treemap view.
#[derive(Clone, Debug)]
pub struct TreemapStyle {
	/// Group colors.
	pub palette: Palette,
	/// Tiling method for sibling rows.
	pub tile: Tile,
	/// Gap between a parent's edge and its children, and between siblings.
	pub padding: f64,
	/// Border of an unselected cell.
	pub border_color: Color,
	/// Border width of an unselected cell.
	pub border_width: f64,
	/// Border of the selected cell.
	pub selected_border_color: Color,
	/// Border width of the selected cell.
	pub selected_border_width: f64,
	/// Fill of the cell under the pointer.
	pub hover_fill: Color,
	/// Cell labels.
	pub label: LabelStyle,
}

impl Default for TreemapStyle {
	fn default() -> Self {
		Self {
			palette: Palette::dark2(),
			tile: Tile::default(),
			padding: 2.0,
			border_color: Color::WHITE,
			border_width: 1.0,
			selected_border_color: Color::BLACK,
			selected_border_width: 3.0,
			hover_fill: Color::rgb(255, 0, 0),
			label: LabelStyle {
				min_width: 30.0,
				min_height: 20.0,
				font_min: 10.0,
				font_max: 14.0,
				char_width: 0.6,
				inset: (4.0, 14.0),
				color: Color::WHITE,
			},
		}
	}
}

/// Complete visual theme for both views.
#[derive(Clone, Debug, Default)]
pub struct Theme {
	/// Force graph view.
	pub graph: GraphStyle,
	/// Treemap view.
	pub treemap: TreemapStyle,
}
