/// Points per inch.
pub const INCH: f32 = 72.0;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// US Letter, 8.5 × 11 in.
pub const LETTER: PageSize = PageSize {
    width: 612.0,
    height: 792.0,
};

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn uniform(all: f32) -> Self {
        Self {
            left: all,
            right: all,
            top: all,
            bottom: all,
        }
    }
}

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const LIGHT_GREY: Color = Color::rgb(0.827, 0.827, 0.827);
    pub const WHITESMOKE: Color = Color::rgb(0.961, 0.961, 0.961);
    pub const DARK_BLUE: Color = Color::rgb(0.0, 0.0, 0.545);
}
