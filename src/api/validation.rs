use crate::core::LabelLayout;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{ChartConfig, ChartStyle};

pub(super) fn validate_chart_config(config: ChartConfig) -> ChartResult<ChartConfig> {
    if !config.touch_slop_px.is_finite() || config.touch_slop_px < 0.0 {
        return Err(ChartError::InvalidConfig(
            "touch slop must be finite and >= 0".to_owned(),
        ));
    }
    let ratio = config.scale_tuning.expansion_ratio;
    if !ratio.is_finite() || ratio < 0.0 {
        return Err(ChartError::InvalidConfig(
            "scale expansion ratio must be finite and >= 0".to_owned(),
        ));
    }
    validate_label_layout(config.label_layout)?;
    validate_chart_style(config.style)?;
    Ok(config)
}

fn validate_label_layout(layout: LabelLayout) -> ChartResult<LabelLayout> {
    for (name, value) in [
        ("margin_px", layout.margin_px),
        ("padding_horizontal_px", layout.padding_horizontal_px),
        ("padding_vertical_px", layout.padding_vertical_px),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "label layout `{name}` must be finite and >= 0"
            )));
        }
    }
    if !layout.text_size_px.is_finite() || layout.text_size_px <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "label text size must be finite and > 0".to_owned(),
        ));
    }
    Ok(layout)
}

pub(super) fn validate_chart_style(style: ChartStyle) -> ChartResult<ChartStyle> {
    for (name, color) in [
        ("line_color", style.line_color),
        ("fill_color", style.fill_color),
        ("grid_line_color", style.grid_line_color),
        ("baseline_color", style.baseline_color),
        ("zero_line_color", style.zero_line_color),
        ("scrub_line_color", style.scrub_line_color),
        ("scrub_cursor_color", style.scrub_cursor_color),
        ("label_text_color", style.label_text_color),
        ("label_background_color", style.label_background_color),
        ("zero_label_text_color", style.zero_label_text_color),
        ("zero_label_background_color", style.zero_label_background_color),
    ] {
        validate_color(name, color)?;
    }

    for (name, value) in [
        ("line_width", style.line_width),
        ("grid_line_width", style.grid_line_width),
        ("baseline_width", style.baseline_width),
        ("zero_line_width", style.zero_line_width),
        ("scrub_line_width", style.scrub_line_width),
        ("scrub_cursor_radius", style.scrub_cursor_radius),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "style `{name}` must be finite and > 0"
            )));
        }
    }

    for (name, value) in [
        ("line_corner_radius", style.line_corner_radius),
        ("label_background_radius", style.label_background_radius),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "style `{name}` must be finite and >= 0"
            )));
        }
    }

    if !(0.0..=1.0).contains(&style.dimmed_label_alpha) {
        return Err(ChartError::InvalidConfig(
            "dimmed label alpha must be in [0, 1]".to_owned(),
        ));
    }

    Ok(style)
}

fn validate_color(name: &str, color: Color) -> ChartResult<()> {
    color
        .validate()
        .map_err(|err| ChartError::InvalidConfig(format!("style `{name}`: {err}")))
}
