use ratatui::{
    Frame,
    layout::{Position, Rect},
    widgets::Clear,
};

/// Place a popup against an anchor cell, preferring the row above it
///
/// The popup's left edge starts at the anchor column. When there is not
/// enough room above the anchor inside `bounds`, the popup flips to the row
/// below. It is shifted left (and clamped) so it never leaves `bounds`.
pub fn popup_at_anchor(anchor: Position, width: u16, height: u16, bounds: Rect) -> Rect {
    let popup_width = width.min(bounds.width);
    let popup_height = height.min(bounds.height);

    let room_above = anchor.y.saturating_sub(bounds.y);
    let bottom = bounds.y + bounds.height;
    let room_below = bottom.saturating_sub(anchor.y + 1);

    let popup_y = if room_above >= popup_height {
        anchor.y - popup_height
    } else if room_below >= popup_height {
        anchor.y + 1
    } else {
        // Neither side fits; pin to the bottom of the bounds
        bottom.saturating_sub(popup_height)
    };

    let right = bounds.x + bounds.width;
    let popup_x = anchor
        .x
        .max(bounds.x)
        .min(right.saturating_sub(popup_width));

    Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Bottom-right corner placement, one cell in from the edges
pub fn bottom_right_popup(frame_area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(frame_area.width.saturating_sub(2));
    let popup_height = height.min(frame_area.height.saturating_sub(1));

    Rect {
        x: frame_area.x + frame_area.width.saturating_sub(popup_width + 1),
        y: frame_area.y + frame_area.height.saturating_sub(popup_height + 1),
        width: popup_width,
        height: popup_height,
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
