use crate::models::{BreakdownEntry, LoadParameter, Series};
use plotters::element::Pie;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::error::Error;

/// Plotters 차트 생성을 위한 공통 구조체
pub struct PlottersConfig {
    pub width: u32,
    pub height: u32,
    pub font_family: &'static str,
    pub title_font_size: u32,
    pub axis_label_font_size: u32,
    pub tick_label_font_size: u32,
    pub point_size: u32,
    pub legend_spacing: u32,
}

impl Default for PlottersConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            font_family: "sans-serif",
            title_font_size: 30,
            axis_label_font_size: 20,
            tick_label_font_size: 15,
            point_size: 4,
            legend_spacing: 30,
        }
    }
}

// 시리즈/슬라이스 색상 팔레트
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

pub fn color_for_index(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// 데이터 범위에 패딩을 추가하는 함수
pub fn add_padding_to_range(min: f64, max: f64, padding_percent: f64) -> (f64, f64) {
    let range = max - min;
    let padding = range * padding_percent;
    (min - padding, max + padding)
}

/// Legend with a filled swatch per entry.
pub fn draw_legend(
    legend_area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    legends: &[(String, RGBColor)],
    config: &PlottersConfig,
) -> Result<(), Box<dyn Error>> {
    legend_area.fill(&WHITE.mix(0.95))?;

    for (i, (name, color)) in legends.iter().enumerate() {
        let spacing = config.legend_spacing as usize;
        let y_pos = (50 + i * spacing) as i32;

        legend_area.draw(&Rectangle::new(
            [(20_i32, y_pos - 8), (40_i32, y_pos + 8)],
            color.filled(),
        ))?;

        legend_area.draw(&Text::new(
            name.clone(),
            (50_i32, y_pos - 8),
            (config.font_family, config.tick_label_font_size),
        ))?;
    }

    Ok(())
}

/// Latency vs number of users, one line per load parameter.
pub fn create_scaling_chart(
    series: &BTreeMap<LoadParameter, Series>,
    title: &str,
    output_prefix: &str,
    config: &PlottersConfig,
) -> Result<String, String> {
    let points = series.values().flat_map(|s| s.points.iter());
    let (max_users, max_latency) = points.fold((0u32, 0f64), |(users, latency), p| {
        (users.max(p.concurrency_level), latency.max(p.latency_ms))
    });
    if series.values().all(Series::is_empty) {
        return Err("No series available for the scaling chart".to_string());
    }

    // x축은 0부터, 가장 큰 사용자 수보다 10% 여유
    let x_max = (max_users as f64 * 1.1).max(1.0);
    let (_, y_max) = add_padding_to_range(0.0, max_latency.max(1.0), 0.05);

    let png_path = format!("{}_scaling.png", output_prefix);
    // 백엔드가 png_path를 빌리므로 그리기가 끝난 뒤 반환
    {
        let root = BitMapBackend::new(&png_path, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (config.font_family, config.title_font_size).into_font())
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_desc("Number of Users")
            .y_desc("Latency (ms)")
            .axis_desc_style((config.font_family, config.axis_label_font_size))
            .label_style((config.font_family, config.tick_label_font_size))
            .draw()
            .map_err(|e| e.to_string())?;

        for (index, s) in series.values().enumerate() {
            let color = color_for_index(index);
            let data: Vec<(f64, f64)> = s
                .points
                .iter()
                .map(|p| (p.concurrency_level as f64, p.latency_ms))
                .collect();

            chart
                .draw_series(LineSeries::new(data.clone(), color.stroke_width(2)))
                .map_err(|e| e.to_string())?
                .label(s.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            chart
                .draw_series(
                    data.into_iter()
                        .map(|(x, y)| Circle::new((x, y), config.point_size, color.filled())),
                )
                .map_err(|e| e.to_string())?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font((config.font_family, config.tick_label_font_size))
            .draw()
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }
    Ok(png_path)
}

/// Donut chart of the round time breakdown with a percentage legend.
pub fn create_breakdown_chart(
    entries: &[BreakdownEntry],
    title: &str,
    output_prefix: &str,
    config: &PlottersConfig,
) -> Result<String, String> {
    if entries.is_empty() {
        return Err("No breakdown entries available for the chart".to_string());
    }

    let png_path = format!("{}_breakdown.png", output_prefix);
    // 백엔드가 png_path를 빌리므로 그리기가 끝난 뒤 반환
    {
        let root = BitMapBackend::new(&png_path, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let root = root
            .titled(title, (config.font_family, config.title_font_size))
            .map_err(|e| e.to_string())?;
        let (chart_area, legend_area) = root.split_horizontally((config.width * 3 / 5) as i32);

        let (w, h) = chart_area.dim_in_pixel();
        let center = ((w / 2) as i32, (h / 2) as i32);
        let radius = (w.min(h) as f64) * 0.4;

        let sizes: Vec<f64> = entries.iter().map(|e| e.percentage).collect();
        let colors: Vec<RGBColor> = (0..entries.len()).map(color_for_index).collect();
        // 조각 위 라벨은 읽기 어려우므로 레전드로만 표시
        let labels: Vec<String> = vec![String::new(); entries.len()];

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(90.0);
        pie.donut_hole(radius * 0.75);
        chart_area.draw(&pie).map_err(|e| e.to_string())?;

        let legends: Vec<(String, RGBColor)> = entries
            .iter()
            .zip(colors.iter())
            .map(|(entry, color)| (entry.legend_label(), *color))
            .collect();
        draw_legend(&legend_area, &legends, config).map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }
    Ok(png_path)
}
