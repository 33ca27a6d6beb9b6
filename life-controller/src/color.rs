//! Cell age to color.

pub type Rgba = [u8; 4];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Live cells are shaded by how many generations they have survived.
    #[default]
    Aged,
    /// Every live cell gets the same color.
    Flat,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Aged => ColorMode::Flat,
            ColorMode::Flat => ColorMode::Aged,
        }
    }
}

pub fn color_for(age: u32, mode: ColorMode, palette: &[Rgba], dead: Rgba, live: Rgba) -> Rgba {
    if age == 0 {
        return dead;
    }
    match mode {
        ColorMode::Flat => live,
        ColorMode::Aged => bucket_color(age, palette).unwrap_or(live),
    }
}

/// Palette entry for a live cell: bucket `floor(log2(age))`, with every age past
/// the last bucket sharing it. `None` for a dead cell or an empty palette.
pub fn bucket_color(age: u32, palette: &[Rgba]) -> Option<Rgba> {
    let last = palette.len().checked_sub(1)?;
    let bucket = age.checked_ilog2()? as usize;
    Some(palette[bucket.min(last)])
}
