use super::chart::{category_label, label_stride, pie_angles, sector_points, value_range};
use super::*;
use crate::analysis::tests::fixture_snapshot;
use crate::analysis::DashboardView;
use pretty_assertions::assert_eq;
use std::f64::consts::{FRAC_PI_2, TAU};

fn rows(values: &[f64]) -> Vec<ChartRow> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| ChartRow::new(&format!("row-{i}"), v))
        .collect()
}

fn key(chart: ChartId, generation: u64) -> ChartKey {
    ChartKey {
        chart,
        generation,
        size: (480, 300),
    }
}

#[test]
fn test_value_range_has_headroom() {
    let (min, max) = value_range(&[1.0, 2.0, 3.0, 10.0]);
    assert_eq!(min, 0.0);
    assert_eq!(max, 11.0);
}

#[test]
fn test_value_range_of_empty_or_flat_data() {
    assert_eq!(value_range(&[]), (0.0, 1.0));
    assert_eq!(value_range(&[0.0, 0.0]), (0.0, 1.0));
}

#[test]
fn test_value_range_with_negatives() {
    // Padding is a tenth of the whole span, applied to both ends
    let (min, max) = value_range(&[-10.0, 20.0]);
    assert_eq!(min, -13.0);
    assert_eq!(max, 23.0);
}

#[test]
fn test_label_stride() {
    assert_eq!(label_stride(0, 8), 1);
    assert_eq!(label_stride(8, 8), 1);
    assert_eq!(label_stride(12, 8), 2);
    assert_eq!(label_stride(25, 8), 4);
}

#[test]
fn test_category_labels_only_on_whole_ticks() {
    let keys = vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()];
    assert_eq!(category_label(&keys, 1.0, 1), "Q2");
    assert_eq!(category_label(&keys, 1.5, 1), "");
    assert_eq!(category_label(&keys, 3.0, 1), "");
    assert_eq!(category_label(&keys, -1.0, 1), "");
    assert_eq!(category_label(&keys, 1.0, 2), "");
    assert_eq!(category_label(&keys, 2.0, 2), "Q3");
}

#[test]
fn test_pie_angles_cover_full_circle() {
    let angles = pie_angles(&rows(&[60.5, 39.5]));
    assert_eq!(angles.len(), 2);
    assert_eq!(angles[0].0, -FRAC_PI_2);
    assert_eq!(angles[0].1, angles[1].0);
    assert!((angles[1].1 - (TAU - FRAC_PI_2)).abs() < 1e-9);
}

#[test]
fn test_pie_ignores_non_positive_rows() {
    let angles = pie_angles(&rows(&[-5.0, 0.0]));
    assert!(angles.iter().all(|(start, end)| start == end));
}

#[test]
fn test_sector_starts_at_center() {
    let points = sector_points((100, 100), 50.0, 0.0, FRAC_PI_2);
    assert_eq!(points[0], (100, 100));
    assert_eq!(points[1], (150, 100));
    assert_eq!(*points.last().unwrap(), (100, 150));
}

#[test]
fn test_value_format_labels() {
    assert_eq!(ValueFormat::Currency.label(12.5), "$12.5M");
    assert_eq!(ValueFormat::Minutes.label(15.0), "15 min");
    assert_eq!(ValueFormat::Plain.label(16_300.0), "16.3K");
    assert_eq!(ValueFormat::Plain.label(2_500_000.0), "2.5M");
    assert_eq!(ValueFormat::Plain.label(7.0), "7");
    assert_eq!(ValueFormat::Plain.label(7.5), "7.5");
}

#[test]
fn test_cache_hits_skip_rendering() {
    let mut cache: ChartCache<u32> = ChartCache::new(4);
    let mut renders = 0;

    for _ in 0..3 {
        let value = cache
            .get_or_render(key(ChartId::MarketShare, 1), || {
                renders += 1;
                Ok::<_, PlotError>(42)
            })
            .unwrap();
        assert_eq!(value, 42);
    }
    assert_eq!(renders, 1);
}

#[test]
fn test_cache_does_not_store_failures() {
    let mut cache: ChartCache<u32> = ChartCache::new(4);
    let failed = cache.get_or_render(key(ChartId::SafetyScores, 1), || {
        Err::<u32, PlotError>("no fonts".into())
    });
    assert!(failed.is_err());
    assert!(cache.is_empty());
}

#[test]
fn test_cache_evicts_old_generations() {
    let mut cache: ChartCache<u32> = ChartCache::new(8);
    let keys = [
        (1, ChartId::MarketShare),
        (1, ChartId::RdInvestment),
        (2, ChartId::MarketShare),
    ];
    for (generation, chart) in keys {
        cache
            .get_or_render(key(chart, generation), || Ok::<_, PlotError>(0))
            .unwrap();
    }

    cache.retain_generation(2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_capacity_is_bounded() {
    let mut cache: ChartCache<u32> = ChartCache::new(2);
    for chart in ChartId::ALL {
        cache
            .get_or_render(key(chart, 1), || Ok::<_, PlotError>(0))
            .unwrap();
    }
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_render_every_dashboard_chart() {
    let view = DashboardView::from_snapshot(&fixture_snapshot());

    for chart in ChartId::ALL {
        let rendered = render_chart(&chart.spec(&view), (480, 280))
            .unwrap_or_else(|e| panic!("{chart:?} failed to render: {e}"));
        assert_eq!(rendered.size, (480, 280));
        assert_eq!(rendered.rgb.len(), 480 * 280 * 3, "{chart:?}");
    }
}

#[test]
fn test_render_empty_bars() {
    let spec = ChartSpec {
        title: "Empty",
        data: ChartData::Bars(&[]),
        format: ValueFormat::Plain,
        y_range: None,
    };
    let rendered = render_chart(&spec, (320, 200)).unwrap();
    assert_eq!(rendered.rgb.len(), 320 * 200 * 3);
}

#[test]
fn test_render_empty_lines() {
    let spec = ChartSpec {
        title: "Empty",
        data: ChartData::Lines(&[]),
        format: ValueFormat::Plain,
        y_range: Some((0.0, 10.0)),
    };
    let rendered = render_chart(&spec, (320, 200)).unwrap();
    assert_eq!(rendered.rgb.len(), 320 * 200 * 3);
}

#[test]
fn test_render_clamps_tiny_sizes() {
    let spec = ChartSpec {
        title: "Tiny",
        data: ChartData::Bars(&[]),
        format: ValueFormat::Plain,
        y_range: None,
    };
    let rendered = render_chart(&spec, (10, 10)).unwrap();
    assert_eq!(rendered.size, (64, 64));
    assert_eq!(rendered.rgb.len(), 64 * 64 * 3);
}
