// Host-side tests for chart geometry and DOM text helpers.

#![allow(dead_code)]
#[path = "../src/charts.rs"]
mod charts;
#[path = "../src/dom.rs"]
mod dom;

use charts::{extent, PlotArea};

#[test]
fn extent_skips_non_finite() {
    assert_eq!(extent([3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]), Some((-1.0, 3.0)));
    assert_eq!(extent(Vec::<f64>::new()), None);
    assert_eq!(extent([f64::NAN]), None);
}

#[test]
fn plot_area_maps_data_to_pixels() {
    let area = PlotArea::inset(200.0, 100.0, 20.0);
    assert_eq!(area.left, 20.0);
    assert_eq!(area.top, 10.0);
    assert_eq!(area.width, 170.0);
    assert_eq!(area.height, 70.0);
    assert_eq!(area.x(0.0, 0.0, 10.0), 20.0);
    assert_eq!(area.x(10.0, 0.0, 10.0), 190.0);
    // Larger values are drawn higher.
    assert_eq!(area.y(10.0, 0.0, 10.0), 10.0);
    assert_eq!(area.y(0.0, 0.0, 10.0), area.bottom());
    // Flat ranges collapse to the axis instead of dividing by zero.
    assert_eq!(area.y(5.0, 5.0, 5.0), area.bottom());
}

#[test]
fn tiny_canvas_keeps_positive_area() {
    let area = PlotArea::inset(10.0, 10.0, 34.0);
    assert!(area.width >= 1.0 && area.height >= 1.0);
}

#[test]
fn html_escape_covers_markup_and_quotes() {
    assert_eq!(
        dom::escape_html(r#"<b a="1">Tom & 'Jo'</b>"#),
        "&lt;b a=&quot;1&quot;&gt;Tom &amp; &#39;Jo&#39;&lt;/b&gt;"
    );
    assert_eq!(dom::escape_html("FP1"), "FP1");
}
