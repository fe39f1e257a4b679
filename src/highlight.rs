use egui::Color32;

/// How a segment is drawn for the current hover state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentState {
    /// No cross-language counterpart (matchId <= 0).
    Neutral,
    /// Part of the concept under the pointer.
    Hovered,
    /// Linked, but another concept is under the pointer.
    Dimmed,
    /// Linked, nothing hovered.
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentColor {
    /// Saturated tone used for the fill and border.
    pub accent: Color32,
    /// Light tone used for the text.
    pub text: Color32,
}

const fn color(accent: u32, text: u32) -> SegmentColor {
    SegmentColor {
        accent: Color32::from_rgb((accent >> 16) as u8, (accent >> 8) as u8, accent as u8),
        text: Color32::from_rgb((text >> 16) as u8, (text >> 8) as u8, text as u8),
    }
}

/// Concept colors, cycled over positive matchIds. Once a response has more
/// concepts than entries here, unrelated concepts share a color.
pub const PALETTE: [SegmentColor; 17] = [
    color(0xef4444, 0xfecaca),
    color(0xf97316, 0xfed7aa),
    color(0xf59e0b, 0xfde68a),
    color(0xeab308, 0xfef08a),
    color(0x84cc16, 0xd9f99d),
    color(0x22c55e, 0xbbf7d0),
    color(0x10b981, 0xa7f3d0),
    color(0x14b8a6, 0x99f6e4),
    color(0x06b6d4, 0xa5f3fc),
    color(0x0ea5e9, 0xbae6fd),
    color(0x3b82f6, 0xbfdbfe),
    color(0x6366f1, 0xc7d2fe),
    color(0x8b5cf6, 0xddd6fe),
    color(0xa855f7, 0xe9d5ff),
    color(0xd946ef, 0xf5d0fe),
    color(0xec4899, 0xfbcfe8),
    color(0xf43f5e, 0xfecdd3),
];

pub const NEUTRAL_COLOR: SegmentColor = color(0x1e293b, 0x94a3b8);

/// Ring drawn around hovered segments.
pub const BRAND_COLOR: Color32 = Color32::from_rgb(0x0e, 0xa5, 0xe9);

const FILL_ALPHA: u8 = 51; // 20 %
const BORDER_ALPHA: u8 = 102; // 40 %
const NEUTRAL_FILL_ALPHA: u8 = 128; // 50 %
const NEUTRAL_OPACITY: f32 = 0.6;
const DIMMED_OPACITY: f32 = 0.3;
const BORDER_WIDTH: f32 = 1.0;
const HOVER_BORDER_WIDTH: f32 = 2.0;

pub fn segment_state(match_id: i64, hovered: Option<i64>) -> SegmentState {
    if match_id <= 0 {
        return SegmentState::Neutral;
    }
    match hovered {
        Some(h) if h == match_id => SegmentState::Hovered,
        Some(_) => SegmentState::Dimmed,
        None => SegmentState::Normal,
    }
}

/// `(match_id - 1) mod PALETTE.len()`, or `None` for unlinked segments.
pub fn color_index(match_id: i64) -> Option<usize> {
    if match_id <= 0 {
        return None;
    }
    Some(((match_id - 1) % PALETTE.len() as i64) as usize)
}

pub fn color_for(match_id: i64) -> SegmentColor {
    color_index(match_id).map_or(NEUTRAL_COLOR, |i| PALETTE[i])
}

/// Concrete paint values for one segment.
///
/// Only colors and strokes vary with the state. Text size is the same in
/// every state, so a segment never changes its layout when hovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub state: SegmentState,
    pub fill: Color32,
    pub text: Color32,
    pub border: Color32,
    pub border_width: f32,
    /// Outer emphasis ring, painted around the chip, only for hovered segments.
    pub ring: Option<Color32>,
}

pub fn segment_style(match_id: i64, hovered: Option<i64>) -> SegmentStyle {
    let state = segment_state(match_id, hovered);
    let palette = color_for(match_id);
    let fill = with_alpha(palette.accent, FILL_ALPHA);
    let border = with_alpha(palette.accent, BORDER_ALPHA);

    match state {
        SegmentState::Neutral => SegmentStyle {
            state,
            fill: with_alpha(palette.accent, NEUTRAL_FILL_ALPHA).gamma_multiply(NEUTRAL_OPACITY),
            text: palette.text.gamma_multiply(NEUTRAL_OPACITY),
            border: Color32::TRANSPARENT,
            border_width: BORDER_WIDTH,
            ring: None,
        },
        SegmentState::Normal => SegmentStyle {
            state,
            fill,
            text: palette.text,
            border,
            border_width: BORDER_WIDTH,
            ring: None,
        },
        SegmentState::Hovered => SegmentStyle {
            state,
            fill,
            text: palette.text,
            border,
            border_width: HOVER_BORDER_WIDTH,
            ring: Some(BRAND_COLOR),
        },
        SegmentState::Dimmed => SegmentStyle {
            state,
            fill: grayscale(fill).gamma_multiply(DIMMED_OPACITY),
            text: grayscale(palette.text).gamma_multiply(DIMMED_OPACITY),
            border: grayscale(border).gamma_multiply(DIMMED_OPACITY),
            border_width: BORDER_WIDTH,
            ring: None,
        },
    }
}

fn with_alpha(c: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), alpha)
}

fn grayscale(c: Color32) -> Color32 {
    let [r, g, b, a] = c.to_array();
    let luma = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8;
    Color32::from_rgba_premultiplied(luma, luma, luma, a)
}
