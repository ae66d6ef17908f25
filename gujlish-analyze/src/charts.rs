//! Chart rendering
//!
//! **Purpose:** Draw the four summary charts for a [`Statistics`] value:
//! - `sentence_distribution`: reference vs mixed sentence counts
//! - `top_topics`: most frequent topics
//! - `language_mix_distribution`: histogram of per-turn English ratios with the mean marked
//! - `identical_sentences_pie`: identical vs different sentence share
//!
//! SVG output is always available. PNG output needs the `png` feature, which
//! pulls in a system font backend for chart text.

use std::path::{Path, PathBuf};

use gujlish_common::config::ChartFormat;
use gujlish_common::Statistics;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::{Error, Result};

const BLUE_BAR: RGBColor = RGBColor(0x66, 0xb3, 0xff);
const RED_BAR: RGBColor = RGBColor(0xff, 0x99, 0x99);
const TOPIC_BAR: RGBColor = RGBColor(0xff, 0xcc, 0x99);
const HISTOGRAM_BAR: RGBColor = RGBColor(0xc2, 0xc2, 0xf0);

/// Longest topic label drawn under a bar
const TOPIC_LABEL_CHARS: usize = 18;

/// Rendering settings
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Directory receiving the images (created if absent)
    pub output_dir: PathBuf,
    pub format: ChartFormat,
    /// Topics drawn in the topic bar chart
    pub top_topics: usize,
    /// Buckets in the English-ratio histogram
    pub histogram_bins: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("analysis_plots"),
            format: ChartFormat::Svg,
            top_topics: 10,
            histogram_bins: 20,
        }
    }
}

/// The charts produced for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SentenceDistribution,
    TopTopics,
    LanguageMixDistribution,
    IdenticalSentencesPie,
}

impl ChartKind {
    /// Every chart, in rendering order
    pub const ALL: [ChartKind; 4] = [
        ChartKind::SentenceDistribution,
        ChartKind::TopTopics,
        ChartKind::LanguageMixDistribution,
        ChartKind::IdenticalSentencesPie,
    ];

    /// Output file name without extension
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::SentenceDistribution => "sentence_distribution",
            ChartKind::TopTopics => "top_topics",
            ChartKind::LanguageMixDistribution => "language_mix_distribution",
            ChartKind::IdenticalSentencesPie => "identical_sentences_pie",
        }
    }

    /// Image size in pixels
    pub fn size(&self) -> (u32, u32) {
        match self {
            ChartKind::SentenceDistribution => (800, 600),
            ChartKind::TopTopics => (1200, 600),
            ChartKind::LanguageMixDistribution => (1000, 600),
            ChartKind::IdenticalSentencesPie => (600, 600),
        }
    }
}

/// Paths of the rendered images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPaths {
    pub sentence_distribution: PathBuf,
    pub top_topics: PathBuf,
    pub language_mix_distribution: PathBuf,
    pub identical_sentences_pie: PathBuf,
}

impl ChartPaths {
    /// All paths, in rendering order
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [
            &self.sentence_distribution,
            &self.top_topics,
            &self.language_mix_distribution,
            &self.identical_sentences_pie,
        ]
        .into_iter()
        .map(PathBuf::as_path)
    }
}

/// Render every chart into `options.output_dir`
pub fn render_charts(stats: &Statistics, options: &ChartOptions) -> Result<ChartPaths> {
    std::fs::create_dir_all(&options.output_dir)?;

    let paths = ChartPaths {
        sentence_distribution: render(ChartKind::SentenceDistribution, stats, options)?,
        top_topics: render(ChartKind::TopTopics, stats, options)?,
        language_mix_distribution: render(ChartKind::LanguageMixDistribution, stats, options)?,
        identical_sentences_pie: render(ChartKind::IdenticalSentencesPie, stats, options)?,
    };

    info!(
        "Rendered {} charts to {}",
        ChartKind::ALL.len(),
        options.output_dir.display()
    );
    Ok(paths)
}

/// Render a single chart and return its path
pub fn render(kind: ChartKind, stats: &Statistics, options: &ChartOptions) -> Result<PathBuf> {
    let path = options
        .output_dir
        .join(format!("{}.{}", kind.file_stem(), options.format.extension()));
    debug!("Rendering {:?} to {}", kind, path.display());

    match options.format {
        ChartFormat::Svg => {
            let root = SVGBackend::new(&path, kind.size()).into_drawing_area();
            draw(kind, &root, stats, options)?;
            root.present().map_err(chart_err)?;
        }
        #[cfg(feature = "png")]
        ChartFormat::Png => {
            let root = BitMapBackend::new(&path, kind.size()).into_drawing_area();
            draw(kind, &root, stats, options)?;
            root.present().map_err(chart_err)?;
        }
        #[cfg(not(feature = "png"))]
        ChartFormat::Png => {
            return Err(Error::UnsupportedFormat(
                "png (rebuild gujlish-analyze with the `png` feature)".to_string(),
            ));
        }
    }

    Ok(path)
}

fn chart_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> Error {
    Error::Chart(err.to_string())
}

fn draw<DB: DrawingBackend>(
    kind: ChartKind,
    root: &DrawingArea<DB, Shift>,
    stats: &Statistics,
    options: &ChartOptions,
) -> Result<()> {
    root.fill(&WHITE).map_err(chart_err)?;

    match kind {
        ChartKind::SentenceDistribution => {
            let bars = [
                ("English (Identical)".to_string(), stats.reference_sentence_count, BLUE_BAR),
                ("Gujlish (Different)".to_string(), stats.mixed_sentence_count, RED_BAR),
            ];
            draw_bars(root, "Sentence Type Distribution", "Number of Sentences", &bars)
        }
        ChartKind::TopTopics => {
            let bars: Vec<(String, u64, RGBColor)> = stats
                .top_topics(options.top_topics)
                .into_iter()
                .map(|(topic, count)| (shorten(topic, TOPIC_LABEL_CHARS), count, TOPIC_BAR))
                .collect();
            let caption = format!("Top {} Conversation Topics", options.top_topics);
            draw_bars(root, &caption, "Number of Conversations", &bars)
        }
        ChartKind::LanguageMixDistribution => {
            draw_ratio_histogram(root, stats, options.histogram_bins)
        }
        ChartKind::IdenticalSentencesPie => draw_identical_pie(root, stats),
    }
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    caption: &str,
    y_desc: &str,
    bars: &[(String, u64, RGBColor)],
) -> Result<()> {
    let max_value = bars.iter().map(|(_, v, _)| *v).max().unwrap_or(0);
    let y_top = axis_top(max_value);
    let segments = bars.len().max(1) as u32;

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d((0u32..segments).into_segmented(), 0u64..y_top)
        .map_err(chart_err)?;

    let label_for = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(i) => bars
            .get(*i as usize)
            .map(|(label, _, _)| label.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len() + 1)
        .x_label_formatter(&label_for)
        .y_desc(y_desc)
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, value, color))| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), *value)],
                color.filled(),
            );
            bar.set_margin(0, 0, 12, 12);
            bar
        }))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_ratio_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    stats: &Statistics,
    bins: usize,
) -> Result<()> {
    let counts = bin_ratios(&stats.english_ratios(), bins);
    let width = 1.0 / counts.len() as f64;
    let y_top = axis_top(counts.iter().copied().max().unwrap_or(0));

    let mut chart = ChartBuilder::on(root)
        .caption(
            "Distribution of English Word Ratio in Gujlish Text",
            ("sans-serif", 24),
        )
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0f64..1f64, 0u64..y_top)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("English Word Ratio")
        .y_desc("Number of Sentences")
        .draw()
        .map_err(chart_err)?;

    let fill = HISTOGRAM_BAR.mix(0.7);
    chart
        .draw_series(counts.iter().enumerate().map(|(i, &count)| {
            let left = i as f64 * width;
            Rectangle::new([(left, 0), (left + width, count)], fill.filled())
        }))
        .map_err(chart_err)?
        .label("English Ratio")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 16, y + 5)], fill.filled()));

    let mean = stats.avg_english_ratio;
    chart
        .draw_series(LineSeries::new(
            vec![(mean, 0), (mean, y_top)],
            RED.stroke_width(2),
        ))
        .map_err(chart_err)?
        .label("Avg English Ratio")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    Ok(())
}

fn draw_identical_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    stats: &Statistics,
) -> Result<()> {
    let area = root
        .titled(
            "Proportion of Identical Gujlish & English Sentences",
            ("sans-serif", 20),
        )
        .map_err(chart_err)?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);

    if stats.total_sentences == 0 {
        area.draw(&Text::new(
            "No sentences",
            (center.0 - 50, center.1),
            ("sans-serif", 20),
        ))
        .map_err(chart_err)?;
        return Ok(());
    }

    let radius = f64::from(width.min(height)) * 0.35;
    let sizes = [
        stats.identical_sentence_count as f64,
        stats.different_sentence_count() as f64,
    ];
    let colors = [BLUE_BAR, RED_BAR];
    let labels = ["Identical", "Different"];

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 16).into_font().color(&BLACK));
    area.draw(&pie).map_err(chart_err)?;

    Ok(())
}

/// Count ratios in `bins` equal-width buckets over [0, 1]
///
/// The last bucket is closed, so a ratio of exactly 1.0 lands in it. At least
/// one bucket is always returned.
pub fn bin_ratios(ratios: &[f64], bins: usize) -> Vec<u64> {
    let bins = bins.max(1);
    let mut counts = vec![0u64; bins];
    for &ratio in ratios {
        let index = ((ratio.clamp(0.0, 1.0) * bins as f64) as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
}

/// Upper bound of a count axis, leaving headroom above the tallest bar
fn axis_top(max_value: u64) -> u64 {
    max_value + max_value / 10 + 1
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}
